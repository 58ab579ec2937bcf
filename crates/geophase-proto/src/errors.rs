//! Error types for wire-format parsing.

use thiserror::Error;

/// Convenience alias for wire-format results.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors from header parsing and canonical (de)serialization.
///
/// These surface caller bugs and malformed public metadata only. Nothing in
/// this enum carries information about ciphertext validity; acceptance of a
/// block is decided elsewhere and collapses every transport failure into a
/// single rejection outcome.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer is too short to contain a public header
    #[error("header too short: need {expected} bytes, got {actual}")]
    HeaderTooShort {
        /// Required length
        expected: usize,
        /// Provided length
        actual: usize,
    },

    /// Header version is not one this implementation speaks
    #[error("unsupported header version: {0:#06x}")]
    UnsupportedVersion(u16),

    /// Parity count is odd or outside the supported 32..=128 range
    #[error("invalid parity count: {0}")]
    InvalidNsym(u16),

    /// Canonical stream ended before the announced field was complete
    #[error("canonical stream truncated")]
    Truncated,

    /// Canonical stream used a value kind this implementation does not know
    #[error("unknown canonical value kind: {0:#04x}")]
    UnknownValueKind(u8),

    /// A key or text value was not valid UTF-8
    #[error("canonical string is not valid UTF-8")]
    InvalidUtf8,

    /// Keys were not strictly ascending (covers duplicates and reordering)
    #[error("canonical keys out of order")]
    NonCanonicalOrder,

    /// Bytes remained after the last complete field
    #[error("trailing bytes after canonical stream: {remaining}")]
    TrailingBytes {
        /// Number of unconsumed bytes
        remaining: usize,
    },

    /// Lossless state compression or decompression failed
    #[error("state compression failed: {reason}")]
    Compression {
        /// Underlying codec message
        reason: String,
    },
}
