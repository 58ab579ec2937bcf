//! Geophase Transport Core
//!
//! An acceptance-gated transport for authenticated messages over lossy
//! carriers. Each block is AEAD-encrypted under a per-position key,
//! Reed-Solomon coded, interleaved, and framed; a hash chain of public
//! commitments binds ordering and tamper-evidence across blocks.
//!
//! # The Covenant
//!
//! One invariant rules everything here: a block is accepted if and only if
//! authenticated decryption of its recovered ciphertext succeeds under the
//! block's public header bytes. Error correction is transport repair -
//! it may fix the codeword, pass it through, or emit garbage, and none of
//! those outcomes carries any authority. The single decision point is
//! [`gate::gate`], the only place an accepting [`VerifyResult`] can come
//! into existence.
//!
//! ```text
//! encode:  plaintext ─ AEAD ─ RS ─ interleave ─ pad ──► carrier
//! decode:  carrier ─ deframe ─ de-interleave ─ RS ──► gate ──► Accept | Reject
//! ```
//!
//! The commitment chain runs beside the pipelines and is consumed by the
//! associated-data builder; it never consumes transport results.
//!
//! # Concurrency
//!
//! Everything is a synchronous pure function; blocks are independent given
//! their context, so callers may parallelize across blocks freely. The
//! core holds no state between calls - chain heads live with the caller.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod chain;
pub mod config;
pub mod decoder;
pub mod ecc;
pub mod encoder;
pub mod error;
pub mod gate;
pub mod interleave;

pub use chain::{ChainAdvance, ChainState, state_digest, verify_commitment};
pub use config::{DEFAULT_FRAME_SIZE, DEFAULT_NSYM, NonceMode, SessionConfig};
pub use decoder::{DecodedBlock, decode_block};
pub use encoder::{BlockContext, EncodedBlock, encode_block};
pub use error::{InvalidInput, Result};
pub use gate::{Plaintext, VerifyResult};

// The primitives callers need to hold keys and states without naming the
// sibling crates directly.
pub use geophase_crypto::{KdfMode, MasterSecret};
pub use geophase_proto::{PublicHeader, StateValue, StructuredState};
