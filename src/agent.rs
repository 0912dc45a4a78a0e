//! Agent lifecycle state as reported by the agent process
//!
//! The agent process is the authority on which transitions are legal; this
//! module only records whatever was last reported.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle phase of the remote agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    Loading,
    Init,
    Running,
    AwaitingUserInput,
    Paused,
    Stopped,
    Finished,
    Error,
}

impl AgentState {
    pub const ALL: [AgentState; 8] = [
        AgentState::Loading,
        AgentState::Init,
        AgentState::Running,
        AgentState::AwaitingUserInput,
        AgentState::Paused,
        AgentState::Stopped,
        AgentState::Finished,
        AgentState::Error,
    ];

    /// Wire name used by the agent protocol
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Loading => "loading",
            AgentState::Init => "init",
            AgentState::Running => "running",
            AgentState::AwaitingUserInput => "awaiting_user_input",
            AgentState::Paused => "paused",
            AgentState::Stopped => "stopped",
            AgentState::Finished => "finished",
            AgentState::Error => "error",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown agent state: {0:?}")]
pub struct UnknownAgentState(pub String);

impl FromStr for AgentState {
    type Err = UnknownAgentState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| UnknownAgentState(s.to_string()))
    }
}

/// What the session currently knows about the agent
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AgentStatus {
    /// No state has been reported yet
    #[default]
    Uninitialized,
    Known(AgentState),
    /// The agent reported a value outside the known set
    Unrecognized(String),
}

impl AgentStatus {
    /// Map a raw wire value; anything unknown is kept verbatim as `Unrecognized`.
    pub fn from_wire(raw: &str) -> Self {
        match raw.parse::<AgentState>() {
            Ok(state) => AgentStatus::Known(state),
            Err(UnknownAgentState(raw)) => AgentStatus::Unrecognized(raw),
        }
    }

    pub fn known(&self) -> Option<AgentState> {
        match self {
            AgentStatus::Known(state) => Some(*state),
            AgentStatus::Uninitialized | AgentStatus::Unrecognized(_) => None,
        }
    }
}

impl From<AgentState> for AgentStatus {
    fn from(state: AgentState) -> Self {
        AgentStatus::Known(state)
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Uninitialized => f.write_str("uninitialized"),
            AgentStatus::Known(state) => state.fmt(f),
            AgentStatus::Unrecognized(raw) => write!(f, "unrecognized({raw})"),
        }
    }
}

/// Holds the single current agent status
#[derive(Debug, Clone, Default)]
pub struct AgentStateModel {
    current: AgentStatus,
}

impl AgentStateModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(status: impl Into<AgentStatus>) -> Self {
        Self {
            current: status.into(),
        }
    }

    pub fn current(&self) -> &AgentStatus {
        &self.current
    }

    /// Clone of the current status, taken once per submission attempt
    pub fn snapshot(&self) -> AgentStatus {
        self.current.clone()
    }

    /// Replace the current status, returning the previous one. Any status may
    /// follow any other.
    pub fn update(&mut self, status: impl Into<AgentStatus>) -> AgentStatus {
        std::mem::replace(&mut self.current, status.into())
    }
}
