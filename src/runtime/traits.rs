//! Trait abstraction for the session transport
//!
//! Lets the controller run against a real channel or a recording mock.

use std::sync::Arc;

/// Outbound half of the bidirectional channel to the agent process.
///
/// `send` is fire-and-forget: it must not block, and whether the frame is
/// delivered or dropped is up to the implementation.
pub trait Transport: Send + Sync {
    fn send(&self, frame: String);

    fn is_connected(&self) -> bool;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, frame: String) {
        (**self).send(frame);
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}
