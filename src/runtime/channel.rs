//! Transport backed by a bounded tokio channel

use super::traits::Transport;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Sends frames into an mpsc channel drained by whatever owns the socket.
///
/// Never waits for capacity: a full or closed channel drops the frame.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::Sender<String>,
}

impl ChannelTransport {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl Transport for ChannelTransport {
    fn send(&self, frame: String) {
        match self.tx.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(frame)) => {
                tracing::warn!(len = frame.len(), "Outbound channel full, dropping frame");
            }
            Err(TrySendError::Closed(frame)) => {
                tracing::warn!(len = frame.len(), "Transport closed, dropping frame");
            }
        }
    }

    fn is_connected(&self) -> bool {
        !self.tx.is_closed()
    }
}
