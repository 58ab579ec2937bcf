//! Geophase Wire Formats
//!
//! Byte-exact formats shared by every conforming implementation:
//!
//! - [`PublicHeader`]: the fixed 80-byte public header `P_t`. Its serialized
//!   bytes are, in their entirety, the associated data authenticated by the
//!   AEAD layer for block `t`.
//! - [`StructuredState`]: canonical serialization of the public per-block
//!   metadata `D_t`. Two implementations must produce byte-identical output
//!   for the same logical state, because the state digest `g_t` is computed
//!   over these bytes.
//!
//! This crate deliberately contains no cryptography and no transport logic.
//! It defines bytes and validates bytes, nothing else.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod canonical;
mod compress;
mod errors;
mod header;

pub use canonical::{StateValue, StructuredState};
pub use compress::{compress_state, decompress_state};
pub use errors::{ProtocolError, Result};
pub use header::PublicHeader;
