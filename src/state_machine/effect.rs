//! Effects produced by submit transitions

use crate::transcript::Message;

/// Effects to be executed, in order, after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append to the transcript (local echo of the user's message)
    AppendMessage(Message),

    /// Build and serialize the action envelope
    EncodeAction { content: String },

    /// Hand the serialized envelope to the transport
    Dispatch { frame: String },
}

impl Effect {
    pub fn echo_user_message(content: impl Into<String>) -> Self {
        Effect::AppendMessage(Message::user(content))
    }
}
