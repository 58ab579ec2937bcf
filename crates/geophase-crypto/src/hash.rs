//! Domain-separated SHA-256 hashing.
//!
//! Every hash in the system carries a fixed ASCII tag prefix so that no two
//! uses can collide on a shared preimage. The tags are part of the wire
//! contract: a conforming implementation in any language must use the same
//! byte strings.

use sha2::{Digest, Sha256};

/// Hash output length (SHA-256).
pub const HASH_LEN: usize = 32;

/// Domain tags, one per hash use. Frozen.
pub mod tags {
    /// Commitment hash `H_t`
    pub const COMMITMENT: &[u8] = b"GP/H_t";
    /// Availability witness `A_t`
    pub const WITNESS: &[u8] = b"GP/A_t";
    /// Derived nonce
    pub const NONCE: &[u8] = b"GP/nonce";
    /// HKDF-mode key schedule info
    pub const KDF: &[u8] = b"GP/kdf";
    /// Deterministic-mode key schedule
    pub const KDF_DET: &[u8] = b"GP/kdf-det";
    /// Interleaver permutation seed
    pub const PERM: &[u8] = b"GP/perm";
    /// Deterministic frame padding
    pub const PAD: &[u8] = b"GP/pad";
    /// Chain genesis constant
    pub const GENESIS: &[u8] = b"GP/genesis";
}

/// Plain SHA-256.
///
/// Used only where the input is already domain-bound (ciphertext digests,
/// canonical state bytes). New hash uses take a tag via [`tagged_hash`].
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; HASH_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 over a tag prefix followed by each part in order.
///
/// Equivalent to `sha256(tag ‖ parts[0] ‖ parts[1] ‖ ...)` without building
/// an intermediate buffer.
#[must_use]
pub fn tagged_hash(tag: &[u8], parts: &[&[u8]]) -> [u8; HASH_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(tag);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
