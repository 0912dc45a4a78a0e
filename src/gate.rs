//! Input gating policy
//!
//! Decides from the agent status alone whether the user may submit input.
//! Connectivity of the transport plays no part here.

use crate::agent::{AgentState, AgentStatus};
use serde::Serialize;

/// Whether new user input may be submitted in `status`.
///
/// Fails closed: an uninitialized or unrecognized status denies submission.
pub fn can_submit(status: &AgentStatus) -> bool {
    match status {
        AgentStatus::Known(state) => state_accepts_input(*state),
        AgentStatus::Uninitialized | AgentStatus::Unrecognized(_) => false,
    }
}

fn state_accepts_input(state: AgentState) -> bool {
    match state {
        AgentState::Init
        | AgentState::Running
        | AgentState::AwaitingUserInput
        | AgentState::Paused => true,
        AgentState::Loading | AgentState::Stopped | AgentState::Finished | AgentState::Error => {
            false
        }
    }
}

/// Enabled/disabled reflection of the gate for the input widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputAffordance {
    pub disabled: bool,
}

impl InputAffordance {
    pub fn for_status(status: &AgentStatus) -> Self {
        Self {
            disabled: !can_submit(status),
        }
    }
}
