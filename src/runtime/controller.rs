//! Session controller: the single owner of transcript and agent state

use super::traits::Transport;
use super::{InboxEvent, SessionUpdate, SubmitOutcome, TransportEvent};
use crate::agent::{AgentStateModel, AgentStatus};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::gate::InputAffordance;
use crate::protocol::encode;
use crate::state_machine::{transition, Effect, Step, SubmitPhase, TransitionError};
use crate::transcript::{Message, TranscriptStore};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

/// Mediates between user input, the transport and the transcript.
///
/// All mutation goes through `submit` and `handle_transport_event`; each runs
/// to completion before the next event is looked at.
pub struct SessionController<T: Transport> {
    agent: AgentStateModel,
    transcript: TranscriptStore,
    phase: SubmitPhase,
    transport: T,
    updates_tx: broadcast::Sender<SessionUpdate>,
}

impl<T: Transport> SessionController<T> {
    pub fn new(transport: T, update_capacity: usize) -> Self {
        let (updates_tx, _) = broadcast::channel(update_capacity.max(1));
        Self {
            agent: AgentStateModel::new(),
            transcript: TranscriptStore::new(),
            phase: SubmitPhase::Idle,
            transport,
            updates_tx,
        }
    }

    pub fn from_config(transport: T, config: &SessionConfig) -> Self {
        Self::new(transport, config.update_capacity)
    }

    /// Start with an already-known agent status
    pub fn with_agent_status(mut self, status: impl Into<AgentStatus>) -> Self {
        self.agent = AgentStateModel::with_status(status);
        self
    }

    /// Start with a preloaded transcript
    pub fn with_transcript(mut self, transcript: TranscriptStore) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.updates_tx.subscribe()
    }

    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    pub fn agent_status(&self) -> &AgentStatus {
        self.agent.current()
    }

    /// Always derived from the current status, never cached
    pub fn input_affordance(&self) -> InputAffordance {
        InputAffordance::for_status(self.agent.current())
    }

    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit user text.
    ///
    /// The agent status is snapshotted once, so a state change delivered
    /// mid-submission cannot half-gate it. On success the user message is in
    /// the transcript before the transport sees the envelope.
    pub fn submit(&mut self, text: &str) -> Result<SubmitOutcome, SessionError> {
        let status = self.agent.snapshot();
        let mut steps = vec![Step::Submit {
            text: text.to_string(),
            status,
        }];

        while let Some(step) = steps.pop() {
            let result = match transition(&self.phase, step) {
                Ok(r) => r,
                Err(TransitionError::Rejected(rejection)) => {
                    tracing::debug!(
                        reason = %rejection,
                        status = %self.agent.current(),
                        "Submission rejected"
                    );
                    self.notify(SessionUpdate::SubmitRejected {
                        reason: rejection.clone(),
                    });
                    return Ok(SubmitOutcome::Rejected(rejection));
                }
                Err(TransitionError::InvalidStep(message)) => {
                    self.phase = SubmitPhase::Idle;
                    return Err(SessionError::InvalidTransition(message));
                }
            };

            self.phase = result.new_phase;

            for effect in result.effects {
                match self.execute_effect(effect) {
                    Ok(Some(next)) => steps.push(next),
                    Ok(None) => {}
                    Err(e) => {
                        self.phase = SubmitPhase::Idle;
                        return Err(e);
                    }
                }
            }
        }

        Ok(SubmitOutcome::Dispatched)
    }

    fn execute_effect(&mut self, effect: Effect) -> Result<Option<Step>, SessionError> {
        match effect {
            Effect::AppendMessage(message) => {
                self.append(message);
                Ok(None)
            }
            Effect::EncodeAction { content } => {
                let frame = encode(&content).to_wire()?;
                Ok(Some(Step::Encoded { frame }))
            }
            Effect::Dispatch { frame } => {
                if !self.transport.is_connected() {
                    // still dispatched; dropping is the transport's call
                    tracing::warn!(len = frame.len(), "Transport not connected, dispatching anyway");
                }
                self.transport.send(frame);
                Ok(Some(Step::Dispatched))
            }
        }
    }

    /// Apply an event surfaced by the transport. Never gated.
    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::StateChanged(status) => {
                let previous = self.agent.update(status.clone());
                let input = InputAffordance::for_status(&status);
                tracing::info!(
                    from = %previous,
                    to = %status,
                    input_disabled = input.disabled,
                    "Agent state changed"
                );
                self.notify(SessionUpdate::StateChanged { status, input });
            }
            TransportEvent::MessageReceived { content } => {
                self.append(Message::assistant(content));
            }
        }
    }

    pub fn handle(&mut self, event: InboxEvent) -> Result<(), SessionError> {
        match event {
            InboxEvent::Submit { text } => self.submit(&text).map(|_| ()),
            InboxEvent::Transport(event) => {
                self.handle_transport_event(event);
                Ok(())
            }
        }
    }

    /// Process inbox events one at a time until the inbox closes or `cancel`
    /// fires. Returns the controller so the final transcript can be read.
    ///
    /// On cancel the inbox is closed to new events and whatever was already
    /// queued is still handled, in order.
    pub async fn run(
        mut self,
        mut inbox: mpsc::Receiver<InboxEvent>,
        cancel: CancellationToken,
    ) -> Self {
        tracing::info!(status = %self.agent.current(), "Starting session controller");

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    inbox.close();
                    let mut drained = 0usize;
                    while let Some(event) = inbox.recv().await {
                        self.process(event);
                        drained += 1;
                    }
                    tracing::debug!(drained, "Inbox drained after cancel");
                    break;
                }
                event = inbox.recv() => {
                    let Some(event) = event else { break };
                    self.process(event);
                }
            }
        }

        tracing::info!(messages = self.transcript.len(), "Session controller stopped");
        self
    }

    fn process(&mut self, event: InboxEvent) {
        if let Err(e) = self.handle(event) {
            tracing::error!(error = %e, "Error handling event");
            self.notify(SessionUpdate::Error {
                message: e.to_string(),
            });
        }
    }

    fn append(&mut self, message: Message) -> usize {
        let index = self.transcript.append(message.clone());
        tracing::debug!(index, sender = %message.sender(), "Appended message");
        self.notify(SessionUpdate::MessageAppended { index, message });
        index
    }

    fn notify(&self, update: SessionUpdate) {
        // no subscribers is fine
        let _ = self.updates_tx.send(update);
    }
}
