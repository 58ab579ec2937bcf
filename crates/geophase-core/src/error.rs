//! Error types for the transport core.
//!
//! The taxonomy is deliberately two-valued. Caller bugs surface as
//! [`InvalidInput`] from the entry points. Everything that happens to a
//! block in flight - noise beyond the correction radius, tampering, a wrong
//! key, a wrong length claim - collapses into the gate's `Reject` verdict
//! and is not represented here. There is no `EccFailure` and no
//! `AuthenticationFailure`: giving those names to callers would invite
//! acceptance logic built on transport outcomes.

use thiserror::Error;

/// Convenience alias for core results.
pub type Result<T> = std::result::Result<T, InvalidInput>;

/// A malformed call into the encoder, decoder, or commitment chain.
///
/// Every variant is a caller bug, detectable before any cryptography runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    /// Plaintext (or declared length) exceeds what one codeword can carry
    #[error("plaintext too large: {len} bytes exceeds {max}")]
    PlaintextTooLarge {
        /// Offending length
        len: usize,
        /// Largest length the session's parity count permits
        max: usize,
    },

    /// Parity count is odd or outside the supported 32..=128 range
    #[error("invalid parity count: {nsym}")]
    BadNsym {
        /// Offending parity count
        nsym: u16,
    },

    /// Configured frame cannot hold the block's codeword
    #[error("frame too small: {frame} bytes, codeword needs {required}")]
    FrameTooSmall {
        /// Configured frame size
        frame: usize,
        /// Codeword length for this block
        required: usize,
    },

    /// Session runs in random-nonce mode but no fresh nonce was supplied
    #[error("random-nonce session requires caller-provided nonce entropy")]
    MissingFreshNonce,

    /// Session runs in derived-nonce mode but a fresh nonce was supplied
    #[error("derived-nonce session must not receive nonce entropy")]
    UnexpectedFreshNonce,

    /// Chain advance with an index other than `prev.t + 1`
    #[error("non-monotonic block index: expected {expected}, got {got}")]
    NonMonotonicIndex {
        /// The only index the chain will accept next
        expected: u64,
        /// Index that was offered
        got: u64,
    },

    /// Header claims a previous hash that is not the chain head
    #[error("previous-hash mismatch at block {t}")]
    PrevHashMismatch {
        /// Block index of the offending header
        t: u64,
    },

    /// Header claims a state digest that does not match the supplied state
    #[error("state-digest mismatch at block {t}")]
    StateDigestMismatch {
        /// Block index of the offending header
        t: u64,
    },
}
