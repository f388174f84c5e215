//! Property tests for fixture id validation.
//!
//! 1. Any strictly increasing id sequence is accepted.
//! 2. Repeating any id anywhere in the sequence is rejected.

use helpdesk_proto::fixture::{FixtureError, ensure_monotonic};
use helpdesk_proto::message::{Message, MessageId};
use proptest::prelude::*;

fn message(id: u64) -> Message {
    Message {
        id: MessageId::new(id),
        sender: "Luis Easton".into(),
        avatar: "L".into(),
        content: format!("message {id}"),
        timestamp: "now".into(),
        is_user: id % 2 == 0,
        seen: None,
    }
}

/// Strictly increasing ids built from positive gaps.
fn arb_increasing_ids() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..50, 0..40).prop_map(|gaps| {
        gaps.iter()
            .scan(0u64, |acc, gap| {
                *acc += gap;
                Some(*acc)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn increasing_ids_are_accepted(ids in arb_increasing_ids()) {
        let messages: Vec<Message> = ids.into_iter().map(message).collect();
        prop_assert!(ensure_monotonic(&messages).is_ok());
    }

    #[test]
    fn repeated_id_is_rejected(ids in arb_increasing_ids(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!ids.is_empty());
        let at = pick.index(ids.len());
        let mut messages: Vec<Message> = ids.into_iter().map(message).collect();
        let dup = messages[at].clone();
        messages.insert(at + 1, dup);
        let result = ensure_monotonic(&messages);
        prop_assert!(matches!(result, Err(FixtureError::NonMonotonicIds { .. })), "expected NonMonotonicIds error");
    }
}
