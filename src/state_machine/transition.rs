//! Pure submit transition function

use super::{Effect, Step, SubmitPhase};
use crate::agent::AgentStatus;
use crate::gate::can_submit;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_phase: SubmitPhase,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(phase: SubmitPhase) -> Self {
        Self {
            new_phase: phase,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// A submission the policy refused. Nothing is echoed or dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Message is empty")]
    EmptyInput,
    #[error("Agent is {status}, input is disabled")]
    Gated { status: AgentStatus },
    #[error("A submission is already being dispatched")]
    SubmitInProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("Invalid transition: {0}")]
    InvalidStep(String),
}

/// Pure transition function: same inputs, same outputs, no I/O.
pub fn transition(phase: &SubmitPhase, step: Step) -> Result<TransitionResult, TransitionError> {
    match (phase, step) {
        // Idle + Submit -> Encoding, echo first
        (SubmitPhase::Idle, Step::Submit { text, status }) => {
            // emptiness is checked before the gate: it is rejected in every state.
            // Accepted text is carried through untrimmed.
            if text.trim().is_empty() {
                return Err(Rejection::EmptyInput.into());
            }
            if !can_submit(&status) {
                return Err(Rejection::Gated { status }.into());
            }
            Ok(TransitionResult::new(SubmitPhase::Encoding {
                content: text.clone(),
            })
            .with_effect(Effect::echo_user_message(text.clone()))
            .with_effect(Effect::EncodeAction { content: text }))
        }

        (SubmitPhase::Encoding { .. } | SubmitPhase::Dispatching { .. }, Step::Submit { .. }) => {
            Err(Rejection::SubmitInProgress.into())
        }

        (SubmitPhase::Encoding { .. }, Step::Encoded { frame }) => Ok(TransitionResult::new(
            SubmitPhase::Dispatching {
                frame: frame.clone(),
            },
        )
        .with_effect(Effect::Dispatch { frame })),

        (SubmitPhase::Dispatching { .. }, Step::Dispatched) => {
            Ok(TransitionResult::new(SubmitPhase::Idle))
        }

        (phase, step) => Err(TransitionError::InvalidStep(format!(
            "{} in phase {}",
            step.name(),
            phase.name()
        ))),
    }
}
