//! Fuzz target for decode_block
//!
//! Arbitrary carriers, arbitrary declared lengths, arbitrary contexts. The
//! decoder must never panic: garbage either surfaces as InvalidInput (a
//! structurally malformed call) or collapses into a Reject verdict.

#![no_main]

use arbitrary::Arbitrary;
use geophase_core::{
    BlockContext, KdfMode, MasterSecret, NonceMode, SessionConfig, StructuredState, decode_block,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct DecodeInput {
    carrier: Vec<u8>,
    declared_len: u32,
    t: u64,
    prev_hash: [u8; 32],
    master: [u8; 32],
    state_word: u64,
    nsym_raw: u8,
    frame_size: u16,
    hkdf: bool,
    random_nonce: bool,
}

fuzz_target!(|input: DecodeInput| {
    let mut state = StructuredState::new();
    state.set_u64("v", input.state_word);

    let config = SessionConfig {
        nsym: u16::from(input.nsym_raw),
        kdf_mode: if input.hkdf { KdfMode::Hkdf } else { KdfMode::Deterministic },
        nonce_mode: if input.random_nonce { NonceMode::Random } else { NonceMode::Derived },
        frame_size: usize::from(input.frame_size),
    };

    let ctx = BlockContext::new(input.t, input.prev_hash, state);
    let master = MasterSecret::from_bytes(input.master);

    // Decoding must never panic; any outcome is fine.
    let _ = decode_block(&input.carrier, input.declared_len, &ctx, &master, &config);
});
