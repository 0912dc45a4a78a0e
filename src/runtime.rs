//! Session runtime: the controller that owns transcript and agent state, plus
//! the inbox and update channels around it.

mod channel;
mod controller;
pub mod traits;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub mod testing;

pub use channel::ChannelTransport;
pub use controller::SessionController;
pub use traits::Transport;

pub use crate::protocol::TransportEvent;

use crate::agent::AgentStatus;
use crate::error::SessionError;
use crate::gate::InputAffordance;
use crate::protocol::decode_frame;
use crate::state_machine::Rejection;
use crate::transcript::Message;
use tokio::sync::mpsc;

/// Events consumed by the controller's event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboxEvent {
    /// The user pressed submit
    Submit { text: String },
    /// Something arrived from the transport
    Transport(TransportEvent),
}

/// Updates broadcast to renderers
#[derive(Debug, Clone)]
pub enum SessionUpdate {
    MessageAppended {
        index: usize,
        message: Message,
    },
    StateChanged {
        status: AgentStatus,
        /// Gate re-evaluated for the new status
        input: InputAffordance,
    },
    SubmitRejected {
        reason: Rejection,
    },
    Error {
        message: String,
    },
}

/// Outcome of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Echoed locally and handed to the transport
    Dispatched,
    /// Nothing changed
    Rejected(Rejection),
}

/// Producer side of the controller inbox
#[derive(Debug, Clone)]
pub struct SessionHandle {
    inbox_tx: mpsc::Sender<InboxEvent>,
}

/// Create an inbox with the given capacity. The receiver goes to
/// `SessionController::run`.
pub fn session_channel(capacity: usize) -> (SessionHandle, mpsc::Receiver<InboxEvent>) {
    let (inbox_tx, inbox_rx) = mpsc::channel(capacity);
    (SessionHandle { inbox_tx }, inbox_rx)
}

impl SessionHandle {
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), SessionError> {
        self.post(InboxEvent::Submit { text: text.into() }).await
    }

    pub async fn deliver(&self, event: TransportEvent) -> Result<(), SessionError> {
        self.post(InboxEvent::Transport(event)).await
    }

    /// Decode a raw agent frame and deliver it. Returns whether the frame
    /// carried an event for the session.
    pub async fn deliver_frame(&self, raw: &str) -> Result<bool, SessionError> {
        match decode_frame(raw)? {
            Some(event) => {
                self.deliver(event).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn post(&self, event: InboxEvent) -> Result<(), SessionError> {
        self.inbox_tx
            .send(event)
            .await
            .map_err(|_| SessionError::InboxClosed)
    }
}
