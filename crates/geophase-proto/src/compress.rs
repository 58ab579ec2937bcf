//! Lossless compression of canonical state bytes.
//!
//! Structured state can be relayed alongside a block for availability.
//! Compression applies to the canonical bytes of `D_t` only - never to
//! ciphertext - and plays no role in hashing or acceptance: the state
//! digest is always computed over the uncompressed canonical bytes.

use crate::{
    canonical::StructuredState,
    errors::{ProtocolError, Result},
};

/// Zstd level for state payloads. States are small; favor speed.
const LEVEL: i32 = 3;

/// Compress a state's canonical bytes for storage or relay.
#[must_use]
pub fn compress_state(state: &StructuredState) -> Vec<u8> {
    let canonical = state.canonical_bytes();
    let Ok(packed) = zstd::encode_all(canonical.as_slice(), LEVEL) else {
        unreachable!("zstd encoding into memory cannot fail");
    };
    packed
}

/// Decompress and parse state produced by [`compress_state`].
///
/// # Errors
///
/// - [`ProtocolError::Compression`] if the zstd frame is damaged
/// - Any canonical parse error if the decompressed bytes are not a valid
///   canonical stream
pub fn decompress_state(bytes: &[u8]) -> Result<StructuredState> {
    let canonical = zstd::decode_all(bytes)
        .map_err(|e| ProtocolError::Compression { reason: e.to_string() })?;
    StructuredState::from_canonical_bytes(&canonical)
}
