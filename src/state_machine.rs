//! Submit lifecycle state machine
//!
//! Pure transitions in the Elm style: the controller feeds steps in, executes
//! the returned effects, and feeds follow-up steps back until the phase is idle.

mod effect;
pub mod phase;
pub mod step;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use phase::SubmitPhase;
pub use step::Step;
pub use transition::{transition, Rejection, TransitionError, TransitionResult};
