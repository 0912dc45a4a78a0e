//! Agent session REPL
//!
//! Reads lines from stdin and submits them through the session controller.
//! A loopback echo agent stands in for the agent process so the whole
//! submit -> dispatch -> reply cycle can be watched from a terminal.

use agent_session::{
    session_channel, ActionEnvelope, Alignment, ChannelTransport, SessionConfig,
    SessionController, SessionHandle, SessionUpdate,
};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SessionConfig::from_env();

    // Initialize logging (stdout is the transcript, logs go to stderr)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::info!(?config, "Starting agent session");

    let (transport, outbound_rx) = ChannelTransport::new(config.outbound_capacity);
    let (handle, inbox) = session_channel(config.inbox_capacity);
    let controller = SessionController::from_config(transport, &config);
    let cancel = CancellationToken::new();

    let mut ready = controller.subscribe();
    let printer = tokio::spawn(print_updates(controller.subscribe()));
    let agent = tokio::spawn(echo_agent(outbound_rx, handle.clone()));
    let session = tokio::spawn(controller.run(inbox, cancel.clone()));

    // Lines typed before the agent announces itself would only be gated away
    wait_for_input(&mut ready).await;
    drop(ready);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        handle.submit(line).await?;
    }

    cancel.cancel();
    let controller = session.await?;
    tracing::info!(
        messages = controller.transcript().len(),
        "Session ended"
    );

    // Dropping the controller closes the outbound channel and the update
    // broadcast, which lets both helper tasks finish.
    drop(controller);
    agent.await?;
    printer.await?;

    Ok(())
}

/// Loopback agent: announces `init`, then echoes every message action back
/// as an assistant message frame.
async fn echo_agent(mut outbound: mpsc::Receiver<String>, handle: SessionHandle) {
    let ready = json!({
        "observation": "agent_state_changed",
        "extras": { "agent_state": "init" }
    });
    if let Err(e) = handle.deliver_frame(&ready.to_string()).await {
        tracing::warn!(error = %e, "Echo agent could not announce state");
        return;
    }

    while let Some(frame) = outbound.recv().await {
        let envelope: ActionEnvelope = match serde_json::from_str(&frame) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "Echo agent received malformed frame");
                continue;
            }
        };

        let reply = json!({
            "action": "message",
            "args": { "content": format!("echo: {}", envelope.args.content) },
            "source": "agent"
        });
        if handle.deliver_frame(&reply.to_string()).await.is_err() {
            break;
        }
    }
}

async fn wait_for_input(updates: &mut broadcast::Receiver<SessionUpdate>) {
    loop {
        match updates.recv().await {
            Ok(SessionUpdate::StateChanged { input, .. }) if !input.disabled => break,
            Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn print_updates(mut updates: broadcast::Receiver<SessionUpdate>) {
    loop {
        match updates.recv().await {
            Ok(SessionUpdate::MessageAppended { message, .. }) => {
                let marker = match message.sender().alignment() {
                    Alignment::End => ">>",
                    Alignment::Start => "<<",
                };
                println!("{marker} {}", message.content());
            }
            Ok(SessionUpdate::StateChanged { status, input }) => {
                let input = if input.disabled { "disabled" } else { "enabled" };
                println!("-- agent {status}, input {input}");
            }
            Ok(SessionUpdate::SubmitRejected { reason }) => println!("-- {reason}"),
            Ok(SessionUpdate::Error { message }) => println!("!! {message}"),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Renderer lagged behind session updates");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
