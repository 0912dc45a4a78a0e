//! Wire protocol with the agent process
//!
//! Outbound: user actions encoded as `ActionEnvelope` JSON.
//! Inbound: raw agent frames decoded into `TransportEvent`s.

mod action;
mod inbound;

pub use action::{encode, ActionArgs, ActionEnvelope, ActionType};
pub use inbound::{decode_frame, TransportEvent};

use thiserror::Error;

/// Errors while encoding or decoding wire frames
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid JSON frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame is missing required field `{0}`")]
    MissingField(&'static str),
}
