//! Fuzz target for the end-to-end covenant
//!
//! Encode a block, apply arbitrary byte mutations to the carrier, then
//! decode. The one invariant worth a fuzzer: a mutated carrier may reject
//! or may survive correction, but an accepting verdict always carries the
//! exact original plaintext. Any counterexample is a covenant breach.

#![no_main]

use arbitrary::Arbitrary;
use geophase_core::{
    BlockContext, KdfMode, MasterSecret, SessionConfig, StructuredState, decode_block,
    encode_block,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct MutationScenario {
    plaintext: Vec<u8>,
    t: u64,
    prev_hash: [u8; 32],
    master: [u8; 32],
    mutations: Vec<(u16, u8)>,
}

fuzz_target!(|scenario: MutationScenario| {
    let config = SessionConfig { kdf_mode: KdfMode::Deterministic, ..Default::default() };

    let mut state = StructuredState::new();
    state.set_u64("v", 1);

    let ctx = BlockContext::new(scenario.t.max(1), scenario.prev_hash, state);
    let master = MasterSecret::from_bytes(scenario.master);

    let Ok(block) = encode_block(&scenario.plaintext, &ctx, &master, &config) else {
        // Oversize plaintext; nothing to mutate.
        return;
    };

    let mut carrier = block.carrier.to_vec();
    for &(offset, mask) in &scenario.mutations {
        let idx = usize::from(offset) % carrier.len();
        carrier[idx] ^= mask;
    }

    let decoded = decode_block(
        &carrier,
        scenario.plaintext.len() as u32,
        &ctx,
        &master,
        &config,
    )
    .expect("well-formed call cannot be InvalidInput");

    if let Some(recovered) = decoded.verdict.into_plaintext() {
        assert_eq!(recovered, scenario.plaintext, "accepted a forged plaintext");
    }
});
