//! Submit lifecycle phases

use serde::Serialize;

/// Where the controller is in handling one submission
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubmitPhase {
    /// Ready for the next submission
    #[default]
    Idle,

    /// User message echoed, envelope being built
    Encoding { content: String },

    /// Envelope serialized, handing it to the transport
    Dispatching { frame: String },
}

impl SubmitPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmitPhase::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmitPhase::Idle => "idle",
            SubmitPhase::Encoding { .. } => "encoding",
            SubmitPhase::Dispatching { .. } => "dispatching",
        }
    }
}
