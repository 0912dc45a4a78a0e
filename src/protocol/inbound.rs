//! Inbound agent frames
//!
//! The agent process emits two frame families that matter to the session:
//! `{"observation":"agent_state_changed","extras":{"agent_state":..}}` and
//! `{"action":"message","args":{"content":..}}`. Everything else is ignored.

use super::ProtocolError;
use crate::agent::AgentStatus;
use serde::Deserialize;
use serde_json::Value;

const OBSERVATION_STATE_CHANGED: &str = "agent_state_changed";
const ACTION_MESSAGE: &str = "message";

/// Events surfaced by the transport collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    StateChanged(AgentStatus),
    MessageReceived { content: String },
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    observation: Option<String>,
    #[serde(default)]
    args: Option<Value>,
    #[serde(default)]
    extras: Option<Value>,
}

/// Decode one raw frame. `Ok(None)` means the frame is well formed but not
/// relevant to the session.
pub fn decode_frame(raw: &str) -> Result<Option<TransportEvent>, ProtocolError> {
    let frame: RawFrame = serde_json::from_str(raw)?;

    if frame.observation.as_deref() == Some(OBSERVATION_STATE_CHANGED) {
        let state = frame
            .extras
            .as_ref()
            .and_then(|extras| extras.get("agent_state"))
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingField("extras.agent_state"))?;
        return Ok(Some(TransportEvent::StateChanged(AgentStatus::from_wire(
            state,
        ))));
    }

    if frame.action.as_deref() == Some(ACTION_MESSAGE) {
        let content = frame
            .args
            .as_ref()
            .and_then(|args| args.get("content"))
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingField("args.content"))?;
        return Ok(Some(TransportEvent::MessageReceived {
            content: content.to_string(),
        }));
    }

    tracing::debug!(
        action = ?frame.action,
        observation = ?frame.observation,
        "Ignoring frame not handled by the session"
    );
    Ok(None)
}
