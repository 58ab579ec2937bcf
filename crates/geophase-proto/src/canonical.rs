//! Canonical serialization of structured block state `D_t`.
//!
//! The state digest `g_t` is a hash over these bytes, so the encoding must
//! be a bijection: one logical state, one byte string, on every platform
//! and in every implementation. The grammar is fixed:
//!
//! ```text
//! stream  := entry*
//! entry   := key value
//! key     := len_be32 utf8-bytes          (keys strictly ascending)
//! value   := 0x01 u64_be                  (unsigned integer)
//!          | 0x02 len_be32 raw-bytes      (byte string)
//!          | 0x03 len_be32 utf8-bytes     (text)
//! ```
//!
//! No maps-within-maps, no floats, no language-native object serialization.
//! The kind byte is part of the grammar, not a language type tag; it exists
//! so that deserialization is the exact inverse of serialization.

use std::collections::BTreeMap;

use crate::errors::{ProtocolError, Result};

const KIND_U64: u8 = 0x01;
const KIND_BYTES: u8 = 0x02;
const KIND_TEXT: u8 = 0x03;

/// A single value in the structured state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateValue {
    /// Unsigned integer, encoded as 8 bytes Big Endian
    U64(u64),
    /// Opaque byte string, length-prefixed
    Bytes(Vec<u8>),
    /// UTF-8 text, length-prefixed
    Text(String),
}

/// Public per-block metadata `D_t` with a canonical byte encoding.
///
/// Entries are kept sorted by key at all times; insertion order never leaks
/// into the encoding. The state is public and non-secret by contract -
/// nothing placed here is encrypted, and everything placed here is bound
/// into the block's commitments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredState {
    entries: BTreeMap<String, StateValue>,
}

impl StructuredState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an unsigned integer field.
    pub fn set_u64(&mut self, key: impl Into<String>, value: u64) {
        self.entries.insert(key.into(), StateValue::U64(value));
    }

    /// Insert or replace a byte-string field.
    pub fn set_bytes(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), StateValue::Bytes(value.into()));
    }

    /// Insert or replace a text field.
    pub fn set_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), StateValue::Text(value.into()));
    }

    /// Look up a field by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.entries.get(key)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the state has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to the canonical byte encoding.
    ///
    /// The output is stable across runs, platforms, and insertion orders.
    /// These are the exact bytes hashed into the state digest `g_t`.
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (key, value) in &self.entries {
            write_len_prefixed(&mut out, key.as_bytes());
            match value {
                StateValue::U64(v) => {
                    out.push(KIND_U64);
                    out.extend_from_slice(&v.to_be_bytes());
                },
                StateValue::Bytes(b) => {
                    out.push(KIND_BYTES);
                    write_len_prefixed(&mut out, b);
                },
                StateValue::Text(s) => {
                    out.push(KIND_TEXT);
                    write_len_prefixed(&mut out, s.as_bytes());
                },
            }
        }
        out
    }

    /// Parse a canonical byte stream back into structured state.
    ///
    /// This is the exact inverse of [`Self::canonical_bytes`]: a stream that
    /// parses re-serializes to the identical bytes. Anything else - wrong
    /// key order, duplicate keys, unknown kinds, truncation, trailing data -
    /// is rejected rather than repaired.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::TrailingBytes`] when fewer bytes dangle after the
    ///   last complete field than could start another one
    /// - [`ProtocolError::Truncated`] when a field announces more content
    ///   than the stream holds
    /// - [`ProtocolError::UnknownValueKind`] on an unrecognized kind byte
    /// - [`ProtocolError::InvalidUtf8`] on malformed keys or text
    /// - [`ProtocolError::NonCanonicalOrder`] on reordered or repeated keys
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self> {
        let mut entries = BTreeMap::new();
        let mut cursor = Cursor { bytes, pos: 0 };
        let mut last_key: Option<String> = None;

        while !cursor.done() {
            // Every entry opens with a 4-byte key length; a shorter tail is
            // dangling data, not a cut-short field.
            if cursor.remaining() < 4 {
                return Err(ProtocolError::TrailingBytes { remaining: cursor.remaining() });
            }

            let key_bytes = cursor.read_len_prefixed()?;
            let key = std::str::from_utf8(key_bytes)
                .map_err(|_| ProtocolError::InvalidUtf8)?
                .to_owned();

            if let Some(prev) = &last_key {
                if key.as_str() <= prev.as_str() {
                    return Err(ProtocolError::NonCanonicalOrder);
                }
            }

            let kind = cursor.read_byte()?;
            let value = match kind {
                KIND_U64 => {
                    let raw = cursor.read_exact(8)?;
                    let mut be = [0u8; 8];
                    be.copy_from_slice(raw);
                    StateValue::U64(u64::from_be_bytes(be))
                },
                KIND_BYTES => StateValue::Bytes(cursor.read_len_prefixed()?.to_vec()),
                KIND_TEXT => {
                    let raw = cursor.read_len_prefixed()?;
                    let text = std::str::from_utf8(raw)
                        .map_err(|_| ProtocolError::InvalidUtf8)?
                        .to_owned();
                    StateValue::Text(text)
                },
                other => return Err(ProtocolError::UnknownValueKind(other)),
            };

            last_key = Some(key.clone());
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }
}

fn write_len_prefixed(out: &mut Vec<u8>, data: &[u8]) {
    // INVARIANT: canonical fields fit a 4-byte BE length. Practical states
    // are a few hundred bytes; a 4 GiB field is a caller bug, not a state.
    #[allow(clippy::expect_used)]
    let len = u32::try_from(data.len()).expect("canonical field length fits in u32");
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(data);
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn done(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn read_byte(&mut self) -> Result<u8> {
        let b = *self.bytes.get(self.pos).ok_or(ProtocolError::Truncated)?;
        self.pos += 1;
        Ok(b)
    }

    fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(ProtocolError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(ProtocolError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn read_len_prefixed(&mut self) -> Result<&'a [u8]> {
        let raw = self.read_exact(4)?;
        let mut be = [0u8; 4];
        be.copy_from_slice(raw);
        self.read_exact(u32::from_be_bytes(be) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_is_empty_stream() {
        let state = StructuredState::new();
        assert!(state.canonical_bytes().is_empty());
        let parsed = StructuredState::from_canonical_bytes(&[]).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let mut a = StructuredState::new();
        a.set_u64("v", 1);
        a.set_text("region", "north");
        a.set_bytes("tag", vec![1, 2, 3]);

        let mut b = StructuredState::new();
        b.set_bytes("tag", vec![1, 2, 3]);
        b.set_u64("v", 1);
        b.set_text("region", "north");

        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
    }

    #[test]
    fn u64_encoding_is_fixed_width() {
        let mut state = StructuredState::new();
        state.set_u64("v", 1);

        let bytes = state.canonical_bytes();
        // key: len(1) || "v", value: kind || 8-byte BE
        let expected: Vec<u8> = [
            &[0, 0, 0, 1][..],
            b"v",
            &[KIND_U64],
            &[0, 0, 0, 0, 0, 0, 0, 1],
        ]
        .concat();
        assert_eq!(bytes, expected);
    }

    #[test]
    fn round_trip_all_kinds() {
        let mut state = StructuredState::new();
        state.set_u64("counter", u64::MAX);
        state.set_bytes("blob", vec![0u8; 64]);
        state.set_text("name", "géophase");

        let bytes = state.canonical_bytes();
        let parsed = StructuredState::from_canonical_bytes(&bytes).unwrap();
        assert_eq!(parsed, state);
        assert_eq!(parsed.canonical_bytes(), bytes);
    }

    #[test]
    fn reject_trailing_bytes() {
        // Fewer than 4 dangling bytes can never open another entry.
        let mut state = StructuredState::new();
        state.set_u64("v", 1);
        let base = state.canonical_bytes();

        for extra in 1usize..4 {
            let mut bytes = base.clone();
            bytes.extend(std::iter::repeat(0x00).take(extra));

            let result = StructuredState::from_canonical_bytes(&bytes);
            assert_eq!(result, Err(ProtocolError::TrailingBytes { remaining: extra }));
        }
    }

    #[test]
    fn reject_truncated_field() {
        // A key length prefix that promises more bytes than the stream
        // holds is a cut-short field, not dangling data.
        let bytes: Vec<u8> = [&[0, 0, 0, 10][..], b"shor"].concat();
        let result = StructuredState::from_canonical_bytes(&bytes);
        assert_eq!(result, Err(ProtocolError::Truncated));
    }

    #[test]
    fn reject_value_cut_short() {
        // Key parses, the u64 payload is missing its tail.
        let bytes: Vec<u8> = [&[0, 0, 0, 1][..], b"k", &[KIND_U64], &[0, 0, 0]].concat();
        let result = StructuredState::from_canonical_bytes(&bytes);
        assert_eq!(result, Err(ProtocolError::Truncated));
    }

    #[test]
    fn reject_unknown_kind() {
        let bytes: Vec<u8> = [&[0, 0, 0, 1][..], b"k", &[0x7F]].concat();
        let result = StructuredState::from_canonical_bytes(&bytes);
        assert_eq!(result, Err(ProtocolError::UnknownValueKind(0x7F)));
    }

    #[test]
    fn reject_reordered_keys() {
        let mut a = StructuredState::new();
        a.set_u64("b", 1);
        let mut b = StructuredState::new();
        b.set_u64("a", 2);

        // "b" before "a" violates ascending order.
        let stream = [a.canonical_bytes(), b.canonical_bytes()].concat();
        let result = StructuredState::from_canonical_bytes(&stream);
        assert_eq!(result, Err(ProtocolError::NonCanonicalOrder));
    }

    #[test]
    fn reject_duplicate_keys() {
        let mut a = StructuredState::new();
        a.set_u64("k", 1);
        let stream = [a.canonical_bytes(), a.canonical_bytes()].concat();
        let result = StructuredState::from_canonical_bytes(&stream);
        assert_eq!(result, Err(ProtocolError::NonCanonicalOrder));
    }

    #[test]
    fn reject_invalid_key_utf8() {
        let bytes: Vec<u8> = [&[0, 0, 0, 2][..], &[0xFF, 0xFE], &[KIND_U64], &[0; 8]].concat();
        let result = StructuredState::from_canonical_bytes(&bytes);
        assert_eq!(result, Err(ProtocolError::InvalidUtf8));
    }
}
