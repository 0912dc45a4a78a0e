//! Mock implementations for testing
//!
//! These mocks let the controller be exercised without a real channel.

use super::traits::Transport;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

// ============================================================================
// Recording Transport
// ============================================================================

/// Transport that records every frame it is handed
pub struct RecordingTransport {
    frames: Mutex<Vec<String>>,
    connected: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            frames: Mutex::new(Vec::new()),
            connected: AtomicBool::new(true),
        }
    }

    /// Frames passed to `send`, in call order
    pub fn sent(&self) -> Vec<String> {
        self.frames.lock().unwrap().clone()
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, frame: String) {
        self.frames.lock().unwrap().push(frame);
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_transport_keeps_call_order() {
        let transport = RecordingTransport::new();
        transport.send("a".to_string());
        transport.send("b".to_string());
        assert_eq!(transport.sent(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_recording_transport_records_while_disconnected() {
        let transport = RecordingTransport::new();
        transport.set_connected(false);
        transport.send("dropped?".to_string());
        assert!(!transport.is_connected());
        assert_eq!(transport.sent().len(), 1);
    }
}
