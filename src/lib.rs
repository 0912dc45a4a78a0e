//! Agent session - client-side conversation layer
//!
//! Gates user input on the agent's lifecycle state, encodes accepted input as
//! action envelopes for the agent transport, and keeps the ordered transcript
//! of user and assistant messages for a renderer to display.

pub mod agent;
pub mod config;
pub mod error;
pub mod gate;
pub mod protocol;
pub mod runtime;
pub mod state_machine;
pub mod transcript;

pub use agent::{AgentState, AgentStateModel, AgentStatus};
pub use config::SessionConfig;
pub use error::SessionError;
pub use gate::{can_submit, InputAffordance};
pub use protocol::{decode_frame, encode, ActionEnvelope, ActionType, ProtocolError};
pub use runtime::{
    session_channel, ChannelTransport, InboxEvent, SessionController, SessionHandle,
    SessionUpdate, SubmitOutcome, Transport, TransportEvent,
};
pub use state_machine::Rejection;
pub use transcript::{Alignment, Message, Sender, TranscriptStore};
