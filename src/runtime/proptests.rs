//! Property-based tests for the session controller
//!
//! Drive arbitrary interleavings of user submissions and transport events and
//! check the transcript against a simple model.

use super::testing::RecordingTransport;
use super::*;
use crate::agent::AgentState;
use crate::gate::can_submit;
use crate::protocol::encode;
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Op {
    Submit(String),
    Assistant(String),
    State(AgentStatus),
}

fn arb_status() -> impl Strategy<Value = AgentStatus> {
    prop_oneof![
        4 => proptest::sample::select(AgentState::ALL.to_vec()).prop_map(AgentStatus::Known),
        1 => "[a-z]{3,10}".prop_map(|raw| AgentStatus::from_wire(&raw)),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => prop_oneof![
            "[a-zA-Z0-9 ]{1,20}",
            "[ \t]{1,4}[a-z]{1,10}\n",
            "[ \t\n]{0,4}",
            "```[a-z]{0,5}\n[a-z().' ]{0,20}\n```",
        ]
        .prop_map(Op::Submit),
        3 => "\\PC{0,30}".prop_map(Op::Assistant),
        2 => arb_status().prop_map(Op::State),
    ]
}

fn new_controller() -> (SessionController<Arc<RecordingTransport>>, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::new());
    (SessionController::new(Arc::clone(&transport), 8), transport)
}

proptest! {
    #[test]
    fn prop_every_accepted_event_appends_exactly_once(
        ops in proptest::collection::vec(arb_op(), 0..40),
    ) {
        let (mut controller, transport) = new_controller();
        let mut expected: Vec<Message> = Vec::new();
        let mut expected_frames: Vec<String> = Vec::new();
        let mut status = AgentStatus::Uninitialized;

        for op in ops {
            let before = controller.transcript().len();
            match op {
                Op::Submit(text) => {
                    let accepted = !text.trim().is_empty() && can_submit(&status);
                    let outcome = controller.submit(&text).unwrap();
                    prop_assert_eq!(outcome == SubmitOutcome::Dispatched, accepted);

                    if accepted {
                        expected_frames.push(encode(&text).to_wire().unwrap());
                        expected.push(Message::user(text));
                        prop_assert_eq!(controller.transcript().len(), before + 1);
                        prop_assert_eq!(controller.transcript().last(), expected.last());
                    } else {
                        prop_assert_eq!(controller.transcript().len(), before);
                    }
                }
                Op::Assistant(content) => {
                    controller.handle_transport_event(TransportEvent::MessageReceived {
                        content: content.clone(),
                    });
                    expected.push(Message::assistant(content));
                    prop_assert_eq!(controller.transcript().len(), before + 1);
                    prop_assert_eq!(controller.transcript().last(), expected.last());
                }
                Op::State(next) => {
                    controller.handle_transport_event(TransportEvent::StateChanged(next.clone()));
                    status = next;
                    prop_assert_eq!(controller.transcript().len(), before);
                    prop_assert_eq!(controller.input_affordance().disabled, !can_submit(&status));
                }
            }
            prop_assert!(controller.phase().is_idle());
        }

        prop_assert_eq!(controller.transcript().list(), expected.as_slice());
        prop_assert_eq!(transport.sent(), expected_frames);
    }

    #[test]
    fn prop_wire_frame_matches_contract(content in "[ \t\n]{0,3}\\PC{0,30}[a-zA-Z0-9]\\PC{0,30}[ \t\n]{0,3}") {
        let (mut controller, transport) = new_controller();
        controller.handle_transport_event(TransportEvent::StateChanged(AgentState::Running.into()));

        controller.submit(&content).unwrap();

        let sent = transport.sent();
        prop_assert_eq!(sent.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
        prop_assert_eq!(
            parsed,
            serde_json::json!({"action": "message", "args": {"content": content}})
        );
    }
}
