//! Crate-level error type

use crate::protocol::ProtocolError;
use thiserror::Error;

/// Failures that are faults rather than policy decisions. Rejected
/// submissions are reported as `SubmitOutcome::Rejected`, not here.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("Invalid submit transition: {0}")]
    InvalidTransition(String),
    #[error("Session inbox is closed")]
    InboxClosed,
}
