//! Outbound action envelope

use super::ProtocolError;
use serde::{Deserialize, Serialize};

/// Kind of user action sent to the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionArgs {
    pub content: String,
}

/// `{"action": ..., "args": {"content": ...}}` - the field set is the
/// compatibility contract with the agent process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionEnvelope {
    pub action: ActionType,
    pub args: ActionArgs,
}

impl ActionEnvelope {
    /// Compact JSON, ready for the transport
    pub fn to_wire(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build the message envelope for `content`.
///
/// Callers reject empty input before this point; the content is carried
/// through verbatim.
pub fn encode(content: &str) -> ActionEnvelope {
    ActionEnvelope {
        action: ActionType::Message,
        args: ActionArgs {
            content: content.to_string(),
        },
    }
}
