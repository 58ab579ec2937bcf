//! Fuzz target for canonical state parsing
//!
//! Arbitrary byte streams must either parse into a state that re-serializes
//! to the identical bytes, or error. No panics, no lossy round trips.

#![no_main]

use geophase_proto::StructuredState;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(state) = StructuredState::from_canonical_bytes(data) {
        assert_eq!(
            state.canonical_bytes(),
            data,
            "canonical parsing must be the exact inverse of serialization"
        );
    }
});
