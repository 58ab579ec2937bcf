//! Session configuration.
//!
//! Three knobs affect the wire format or the schedule - parity count, KDF
//! mode, nonce mode - and one affects only framing (frame size). All are
//! fixed at session start; nothing here may vary per block.

use geophase_crypto::{KdfMode, NONCE_LEN, TAG_LEN};
use geophase_proto::PublicHeader;

use crate::error::{InvalidInput, Result};

/// Largest codeword GF(2^8) Reed-Solomon can carry (symbols per codeword).
pub const MAX_CODEWORD_LEN: usize = 255;

/// Default parity count: corrects up to 32 byte errors per codeword.
pub const DEFAULT_NSYM: u16 = 64;

/// Default carrier frame size in bytes.
pub const DEFAULT_FRAME_SIZE: usize = 1024;

/// Nonce handling, fixed at session start.
///
/// The wire format is identical in both modes: the first 12 codeword bytes
/// are always a nonce slot. Derived-nonce sessions fill it with the derived
/// value (redundant, but framing stays uniform); random-nonce sessions fill
/// it with caller-provided entropy that the decoder then has to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonceMode {
    /// Nonce derived from the block key; fully deterministic sessions
    #[default]
    Derived,
    /// Caller supplies fresh entropy per block; nonce travels in the codeword
    Random,
}

/// Immutable per-session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Reed-Solomon parity bytes per codeword (even, 32..=128)
    pub nsym: u16,
    /// Key schedule mode
    pub kdf_mode: KdfMode,
    /// Nonce handling mode
    pub nonce_mode: NonceMode,
    /// Total carrier length; must hold the largest codeword the session
    /// will produce
    pub frame_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            nsym: DEFAULT_NSYM,
            kdf_mode: KdfMode::default(),
            nonce_mode: NonceMode::default(),
            frame_size: DEFAULT_FRAME_SIZE,
        }
    }
}

impl SessionConfig {
    /// Validate the configuration once, at session start.
    ///
    /// # Errors
    ///
    /// - [`InvalidInput::BadNsym`] for an odd or out-of-range parity count
    /// - [`InvalidInput::FrameTooSmall`] if even an empty-plaintext codeword
    ///   would not fit the frame
    pub fn validate(&self) -> Result<()> {
        if self.nsym % 2 != 0
            || !(PublicHeader::MIN_NSYM..=PublicHeader::MAX_NSYM).contains(&self.nsym)
        {
            return Err(InvalidInput::BadNsym { nsym: self.nsym });
        }

        let min_codeword = self.codeword_len(0);
        if self.frame_size < min_codeword {
            return Err(InvalidInput::FrameTooSmall {
                frame: self.frame_size,
                required: min_codeword,
            });
        }

        Ok(())
    }

    /// Codeword length for a block with plaintext length `plaintext_len`:
    /// `NONCE_LEN + L + TAG_LEN + nsym`.
    #[must_use]
    pub fn codeword_len(&self, plaintext_len: usize) -> usize {
        NONCE_LEN + plaintext_len + TAG_LEN + self.nsym as usize
    }

    /// Largest plaintext a single codeword can carry under this parity
    /// count. One byte beyond this is `InvalidInput`, not a shorter tag.
    #[must_use]
    pub fn max_plaintext_len(&self) -> usize {
        MAX_CODEWORD_LEN - NONCE_LEN - TAG_LEN - self.nsym as usize
    }
}
