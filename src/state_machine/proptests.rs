//! Property-based tests for the submit state machine

use super::*;
use crate::agent::{AgentState, AgentStatus};
use crate::gate::can_submit;
use crate::transcript::Message;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_agent_state() -> impl Strategy<Value = AgentState> {
    proptest::sample::select(AgentState::ALL.to_vec())
}

fn arb_agent_status() -> impl Strategy<Value = AgentStatus> {
    prop_oneof![
        Just(AgentStatus::Uninitialized),
        arb_agent_state().prop_map(AgentStatus::Known),
        "[a-z_]{1,20}".prop_map(|raw| AgentStatus::from_wire(&raw)),
    ]
}

fn arb_whitespace() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,12}"
}

/// Text that is non-empty after trimming, possibly with surrounding whitespace
fn arb_content() -> impl Strategy<Value = String> {
    (
        arb_whitespace(),
        "\\PC{0,40}[a-zA-Z0-9`{}\"\\\\]\\PC{0,40}",
        arb_whitespace(),
    )
        .prop_map(|(lead, body, trail)| format!("{lead}{body}{trail}"))
}

fn arb_busy_phase() -> impl Strategy<Value = SubmitPhase> {
    prop_oneof![
        arb_content().prop_map(|content| SubmitPhase::Encoding { content }),
        arb_content().prop_map(|frame| SubmitPhase::Dispatching { frame }),
    ]
}

proptest! {
    #[test]
    fn prop_whitespace_only_input_never_produces_effects(
        text in arb_whitespace(),
        status in arb_agent_status(),
    ) {
        let result = transition(&SubmitPhase::Idle, Step::Submit { text, status });
        prop_assert_eq!(result.unwrap_err(), TransitionError::Rejected(Rejection::EmptyInput));
    }

    #[test]
    fn prop_submit_follows_gate(
        content in arb_content(),
        status in arb_agent_status(),
    ) {
        let permitted = can_submit(&status);
        let result = transition(&SubmitPhase::Idle, Step::Submit { text: content.clone(), status });

        if permitted {
            let result = result.unwrap();
            prop_assert_eq!(
                result.effects,
                vec![
                    Effect::AppendMessage(Message::user(content.clone())),
                    Effect::EncodeAction { content: content.clone() },
                ]
            );
            prop_assert_eq!(result.new_phase, SubmitPhase::Encoding { content });
        } else {
            let is_gated = matches!(result, Err(TransitionError::Rejected(Rejection::Gated { .. })));
            prop_assert!(is_gated);
        }
    }

    #[test]
    fn prop_busy_phase_rejects_submit(
        phase in arb_busy_phase(),
        content in arb_content(),
        state in arb_agent_state(),
    ) {
        let result = transition(&phase, Step::Submit { text: content, status: state.into() });
        prop_assert_eq!(
            result.unwrap_err(),
            TransitionError::Rejected(Rejection::SubmitInProgress)
        );
    }

    #[test]
    fn prop_accepted_submit_always_returns_to_idle(
        content in arb_content(),
        state in arb_agent_state(),
    ) {
        let status = AgentStatus::Known(state);
        prop_assume!(can_submit(&status));

        let mut phase = SubmitPhase::Idle;
        let mut steps = vec![Step::Submit { text: content, status }];
        let mut dispatched = 0;

        while let Some(step) = steps.pop() {
            let result = transition(&phase, step).unwrap();
            phase = result.new_phase;
            for effect in result.effects {
                match effect {
                    Effect::AppendMessage(_) => {}
                    Effect::EncodeAction { content } => steps.push(Step::Encoded { frame: content }),
                    Effect::Dispatch { .. } => {
                        dispatched += 1;
                        steps.push(Step::Dispatched);
                    }
                }
            }
        }

        prop_assert!(phase.is_idle());
        prop_assert_eq!(dispatched, 1);
    }
}
