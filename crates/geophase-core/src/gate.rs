//! The acceptance gate.
//!
//! One rule, no exceptions: a block is accepted if and only if
//! authenticated decryption of its candidate ciphertext succeeds under the
//! block's key, nonce, and public header bytes. Error correction upstream
//! may have repaired the candidate, passed it through untouched, or
//! produced garbage - the gate neither knows nor cares. No acceptance path
//! in this crate bypasses [`gate`], and no other code can construct the
//! accepting verdict.
//!
//! The gate is pure: no logging, no global state, no timing behavior
//! beyond the AEAD primitive's own.

use geophase_crypto::{BlockKey, NONCE_LEN, open};

/// Plaintext recovered by the gate.
///
/// The only way to obtain one is a successful authenticated decryption -
/// the field is private and this module exposes no constructor:
///
/// ```compile_fail
/// let forged = geophase_core::gate::Plaintext { bytes: b"forged".to_vec() };
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Plaintext {
    bytes: Vec<u8>,
}

impl Plaintext {
    /// Recovered message bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the verdict payload.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Length of the recovered message.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for an empty recovered message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Plaintext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Plaintext({} bytes)", self.bytes.len())
    }
}

/// The two-valued acceptance verdict. Immutable once constructed.
///
/// `Reject` carries nothing: a wrong key, altered associated data, noise
/// beyond the correction radius, and a wrong length claim are one and the
/// same outcome, and no diagnostic distinguishes them here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyResult {
    /// Authenticated decryption succeeded; the plaintext is genuine.
    Accept {
        /// The recovered message
        plaintext: Plaintext,
    },
    /// Authenticated decryption failed.
    Reject,
}

impl VerifyResult {
    /// True for the accepting verdict.
    #[must_use]
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept { .. })
    }

    /// Recovered bytes, or `None` on rejection.
    #[must_use]
    pub fn into_plaintext(self) -> Option<Vec<u8>> {
        match self {
            Self::Accept { plaintext } => Some(plaintext.into_bytes()),
            Self::Reject => None,
        }
    }
}

/// Decide acceptance for one candidate ciphertext.
///
/// Performs authenticated decryption and nothing else. Every acceptance
/// path in the system terminates here; this function is the only
/// construction site of [`VerifyResult::Accept`].
#[must_use]
pub fn gate(key: &BlockKey, nonce: &[u8; NONCE_LEN], ciphertext: &[u8], ad: &[u8]) -> VerifyResult {
    match open(key, nonce, ciphertext, ad) {
        Some(bytes) => VerifyResult::Accept { plaintext: Plaintext { bytes } },
        None => VerifyResult::Reject,
    }
}
