//! Property-based tests for canonical state serialization
//!
//! The canonical encoding must be a bijection: every state has exactly one
//! byte representation, and parsing is its exact inverse. The state digest
//! and the commitment chain both hash these bytes, so any drift here breaks
//! cross-implementation verification.

use geophase_proto::{StateValue, StructuredState, compress_state, decompress_state};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = StateValue> {
    prop_oneof![
        any::<u64>().prop_map(StateValue::U64),
        prop::collection::vec(any::<u8>(), 0..128).prop_map(StateValue::Bytes),
        "[a-zA-Z0-9 _-]{0,48}".prop_map(StateValue::Text),
    ]
}

fn arb_state() -> impl Strategy<Value = StructuredState> {
    prop::collection::btree_map("[a-z][a-z0-9_]{0,15}", arb_value(), 0..8).prop_map(|map| {
        let mut state = StructuredState::new();
        for (key, value) in map {
            match value {
                StateValue::U64(v) => state.set_u64(key, v),
                StateValue::Bytes(b) => state.set_bytes(key, b),
                StateValue::Text(t) => state.set_text(key, t),
            }
        }
        state
    })
}

proptest! {
    #[test]
    fn round_trip(state in arb_state()) {
        let bytes = state.canonical_bytes();
        let parsed = StructuredState::from_canonical_bytes(&bytes).expect("should parse");
        prop_assert_eq!(&parsed, &state);
        // Re-serialization is byte-identical: the encoding is a bijection.
        prop_assert_eq!(parsed.canonical_bytes(), bytes);
    }

    #[test]
    fn serialization_is_stable(state in arb_state()) {
        prop_assert_eq!(state.canonical_bytes(), state.clone().canonical_bytes());
    }

    #[test]
    fn parse_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        // Malformed streams must error, never crash.
        let _ = StructuredState::from_canonical_bytes(&bytes);
    }

    #[test]
    fn compressed_round_trip(state in arb_state()) {
        let restored = decompress_state(&compress_state(&state)).expect("should decompress");
        prop_assert_eq!(restored, state);
    }
}
