//! Per-block key schedule.
//!
//! Two modes, fixed at session start:
//!
//! - [`KdfMode::Deterministic`]: a single tagged hash over the master
//!   secret, block index, and previous commitment hash. Used for
//!   reproducibility testing; every session output is a pure function of
//!   its inputs.
//! - [`KdfMode::Hkdf`]: HKDF-SHA256 extract-then-expand with the previous
//!   commitment hash as salt. The production schedule.
//!
//! Both modes bind `(t, H_{t-1})`, so no key is ever valid at more than one
//! chain position. All functions here are pure and infallible.

use hkdf::Hkdf;
use sha2::Sha256;

use crate::{
    aead::{KEY_LEN, NONCE_LEN},
    hash::{HASH_LEN, tagged_hash, tags},
    secret::{BlockKey, MasterSecret},
};

/// Key schedule selection. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KdfMode {
    /// Tagged-hash derivation, for reproducibility tests
    Deterministic,
    /// HKDF-SHA256 extract-then-expand, for production
    #[default]
    Hkdf,
}

/// Derive the block key `K_t` from master material and chain position.
#[must_use]
pub fn derive_block_key(
    master: &MasterSecret,
    t: u64,
    prev_hash: &[u8; HASH_LEN],
    mode: KdfMode,
) -> BlockKey {
    match mode {
        KdfMode::Deterministic => {
            let key = tagged_hash(
                tags::KDF_DET,
                &[master.as_bytes(), &t.to_be_bytes(), prev_hash],
            );
            BlockKey::new(key)
        },
        KdfMode::Hkdf => {
            let hkdf = Hkdf::<Sha256>::new(Some(prev_hash.as_slice()), master.as_bytes());

            let mut info = Vec::with_capacity(tags::KDF.len() + 8);
            info.extend_from_slice(tags::KDF);
            info.extend_from_slice(&t.to_be_bytes());

            let mut key = [0u8; KEY_LEN];
            let Ok(()) = hkdf.expand(&info, &mut key) else {
                unreachable!("32 bytes is a valid HKDF-SHA256 output length");
            };
            BlockKey::new(key)
        },
    }
}

/// Derive the nonce `N_t` for derived-nonce sessions.
///
/// First 12 bytes of `H("GP/nonce" ‖ K_t ‖ t_be)`. Unique per `K_t` because
/// `K_t` itself is unique per `(t, H_{t-1})`. Random-nonce sessions skip
/// this and carry caller-provided entropy in the codeword instead.
#[must_use]
pub fn derive_nonce(key: &BlockKey, t: u64) -> [u8; NONCE_LEN] {
    let digest = tagged_hash(tags::NONCE, &[key.key(), &t.to_be_bytes()]);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&digest[..NONCE_LEN]);
    nonce
}

/// Derive the interleaver permutation seed for block `t`.
///
/// `H("GP/perm" ‖ H_{t-1} ‖ t_be)`. Public: the permutation is transport
/// scrambling, not secrecy, and anyone holding the chain position can undo
/// it. Secrecy and authenticity come from the AEAD layer alone.
#[must_use]
pub fn derive_perm_seed(prev_hash: &[u8; HASH_LEN], t: u64) -> [u8; HASH_LEN] {
    tagged_hash(tags::PERM, &[prev_hash, &t.to_be_bytes()])
}

/// Deterministic frame padding for block `t`, extended to `len` bytes.
///
/// The first 32 bytes are `H("GP/pad" ‖ H_{t-1} ‖ t_be)`; each further
/// block is the hash of the previous one. Padding sits outside the codeword
/// and outside the permutation; decoders discard it without inspection.
#[must_use]
pub fn derive_pad(prev_hash: &[u8; HASH_LEN], t: u64, len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len.next_multiple_of(HASH_LEN));
    let mut block = tagged_hash(tags::PAD, &[prev_hash, &t.to_be_bytes()]);
    while out.len() < len {
        out.extend_from_slice(&block);
        block = crate::hash::sha256(&block);
    }
    out.truncate(len);
    out
}
