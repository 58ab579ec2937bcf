//! Deterministic byte interleaving.
//!
//! A keyed Fisher-Yates permutation spreads burst corruption across the
//! whole codeword so it lands inside the Reed-Solomon correction window.
//! The permutation is driven by a public seed derived from the chain
//! position; it contributes nothing to secrecy and exactly inverts.

use geophase_crypto::sha256;

/// Hash-counter stream over the permutation seed. Each 32-byte block is
/// `SHA-256(seed ‖ counter_be)`; draws are 4 bytes at a time.
struct SeedStream {
    seed: [u8; 32],
    counter: u32,
    block: [u8; 32],
    offset: usize,
}

impl SeedStream {
    fn new(seed: [u8; 32]) -> Self {
        Self { seed, counter: 0, block: [0u8; 32], offset: 32 }
    }

    fn next_u32(&mut self) -> u32 {
        if self.offset + 4 > 32 {
            let mut preimage = [0u8; 36];
            preimage[..32].copy_from_slice(&self.seed);
            preimage[32..].copy_from_slice(&self.counter.to_be_bytes());
            self.block = sha256(&preimage);
            self.counter = self.counter.wrapping_add(1);
            self.offset = 0;
        }
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.block[self.offset..self.offset + 4]);
        self.offset += 4;
        u32::from_be_bytes(word)
    }

    /// Unbiased draw in `0..n` by rejection sampling.
    fn next_below(&mut self, n: u64) -> u64 {
        debug_assert!(n > 0 && n <= u64::from(u32::MAX));
        let limit = (1u64 << 32) / n * n;
        loop {
            let v = u64::from(self.next_u32());
            if v < limit {
                return v % n;
            }
        }
    }
}

/// The Fisher-Yates swap sequence for a buffer of `len` bytes under `seed`.
fn swap_sequence(seed: &[u8; 32], len: usize) -> Vec<(usize, usize)> {
    let mut stream = SeedStream::new(*seed);
    let mut swaps = Vec::with_capacity(len.saturating_sub(1));
    for j in (1..len).rev() {
        let r = stream.next_below(j as u64 + 1) as usize;
        swaps.push((j, r));
    }
    swaps
}

/// Apply the keyed permutation.
#[must_use]
pub fn permute(data: &[u8], seed: &[u8; 32]) -> Vec<u8> {
    let mut out = data.to_vec();
    for (j, r) in swap_sequence(seed, data.len()) {
        out.swap(j, r);
    }
    out
}

/// Invert the keyed permutation: `unpermute(permute(b, s), s) == b`.
#[must_use]
pub fn unpermute(data: &[u8], seed: &[u8; 32]) -> Vec<u8> {
    let mut out = data.to_vec();
    for &(j, r) in swap_sequence(seed, data.len()).iter().rev() {
        out.swap(j, r);
    }
    out
}
