//! Inputs that drive the submit lifecycle

use crate::agent::AgentStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The user pressed submit. `status` is the agent status snapshot taken
    /// once for this attempt.
    Submit { text: String, status: AgentStatus },

    /// The envelope has been serialized
    Encoded { frame: String },

    /// The transport call returned
    Dispatched,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Submit { .. } => "submit",
            Step::Encoded { .. } => "encoded",
            Step::Dispatched => "dispatched",
        }
    }
}
