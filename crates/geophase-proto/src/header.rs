//! Public header implementation with zero-copy parsing.
//!
//! The `PublicHeader` is a fixed 80-byte structure serialized as raw binary
//! (Big Endian). Its bytes double as the AEAD associated data for the block,
//! so the layout is frozen: any deviation changes what the authentication
//! tag covers and makes honest blocks unverifiable.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::errors::{ProtocolError, Result};

/// Fixed 80-byte public header `P_t` (Big Endian network byte order).
///
/// Layout on the wire:
///
/// ```text
/// offset  0: version        (2 bytes)
/// offset  2: block index t  (8 bytes)
/// offset 10: H_{t-1}        (32 bytes)
/// offset 42: g_t            (32 bytes)
/// offset 74: plaintext len  (4 bytes)
/// offset 78: nsym           (2 bytes)
/// ```
///
/// All multi-byte integers are Big Endian. Fields are stored as raw byte
/// arrays to keep the struct layout identical to the wire layout.
///
/// # Security
///
/// Every field here is public, and every field is authenticated: the 80
/// serialized bytes are bound into the AEAD as associated data in their
/// entirety. Tampering with the block index, the previous commitment hash,
/// the state digest, the declared length, or the parity count therefore
/// causes authentication failure rather than a parse error. Nothing secret
/// may ever be added to this structure.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct PublicHeader {
    version: [u8; 2],
    block_index: [u8; 8],
    prev_hash: [u8; 32],
    state_digest: [u8; 32],
    plaintext_len: [u8; 4],
    nsym: [u8; 2],
}

impl PublicHeader {
    /// Size of the serialized header (80 bytes)
    pub const SIZE: usize = 80;

    /// Current header version
    pub const VERSION: u16 = 0x0001;

    /// Smallest supported parity count
    pub const MIN_NSYM: u16 = 32;

    /// Largest supported parity count
    pub const MAX_NSYM: u16 = 128;

    /// Create a header from its declared fields.
    #[must_use]
    pub fn new(
        block_index: u64,
        prev_hash: [u8; 32],
        state_digest: [u8; 32],
        plaintext_len: u32,
        nsym: u16,
    ) -> Self {
        Self {
            version: Self::VERSION.to_be_bytes(),
            block_index: block_index.to_be_bytes(),
            prev_hash,
            state_digest,
            plaintext_len: plaintext_len.to_be_bytes(),
            nsym: nsym.to_be_bytes(),
        }
    }

    /// Parse a header from bytes (zero-copy, safe).
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::HeaderTooShort`] if fewer than 80 bytes are given
    /// - [`ProtocolError::UnsupportedVersion`] on a version mismatch
    /// - [`ProtocolError::InvalidNsym`] if the parity count is odd or
    ///   outside `MIN_NSYM..=MAX_NSYM`
    ///
    /// # Security
    ///
    /// Validation here is structural only. A header that parses is not a
    /// header that can be trusted: verifiers recompute the expected header
    /// from their own context and never act on parsed fields alone.
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        let header = Self::ref_from_prefix(bytes)
            .map_err(|_| ProtocolError::HeaderTooShort {
                expected: Self::SIZE,
                actual: bytes.len(),
            })?
            .0;

        if header.version() != Self::VERSION {
            return Err(ProtocolError::UnsupportedVersion(header.version()));
        }

        let nsym = header.nsym();
        if nsym % 2 != 0 || !(Self::MIN_NSYM..=Self::MAX_NSYM).contains(&nsym) {
            return Err(ProtocolError::InvalidNsym(nsym));
        }

        Ok(header)
    }

    /// Serialize the header to its 80 wire bytes.
    ///
    /// The returned bytes are exactly the associated data `AD_t` bound into
    /// the AEAD for this block.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let bytes = IntoBytes::as_bytes(self);
        let mut arr = [0u8; Self::SIZE];
        arr.copy_from_slice(bytes);
        arr
    }

    /// Header version (currently 0x0001).
    #[must_use]
    pub fn version(&self) -> u16 {
        u16::from_be_bytes(self.version)
    }

    /// Block index `t`.
    #[must_use]
    pub fn block_index(&self) -> u64 {
        u64::from_be_bytes(self.block_index)
    }

    /// Previous commitment hash `H_{t-1}`.
    #[must_use]
    pub fn prev_hash(&self) -> &[u8; 32] {
        &self.prev_hash
    }

    /// State digest `g_t`.
    #[must_use]
    pub fn state_digest(&self) -> &[u8; 32] {
        &self.state_digest
    }

    /// Declared plaintext length `L`.
    #[must_use]
    pub fn plaintext_len(&self) -> u32 {
        u32::from_be_bytes(self.plaintext_len)
    }

    /// Reed–Solomon parity count for this block's codeword.
    #[must_use]
    pub fn nsym(&self) -> u16 {
        u16::from_be_bytes(self.nsym)
    }
}

impl std::fmt::Debug for PublicHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicHeader")
            .field("version", &format!("{:#06x}", self.version()))
            .field("block_index", &self.block_index())
            .field("prev_hash", &format!("{:02x?}", &self.prev_hash[..4]))
            .field("state_digest", &format!("{:02x?}", &self.state_digest[..4]))
            .field("plaintext_len", &self.plaintext_len())
            .field("nsym", &self.nsym())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_size() {
        assert_eq!(std::mem::size_of::<PublicHeader>(), PublicHeader::SIZE);
        assert_eq!(PublicHeader::SIZE, 80);
    }

    #[test]
    fn round_trip() {
        let header = PublicHeader::new(7, [0xAA; 32], [0xBB; 32], 163, 64);
        let bytes = header.to_bytes();
        let parsed = PublicHeader::from_bytes(&bytes).expect("should parse");
        assert_eq!(&header, parsed);
        assert_eq!(parsed.block_index(), 7);
        assert_eq!(parsed.plaintext_len(), 163);
        assert_eq!(parsed.nsym(), 64);
    }

    #[test]
    fn field_offsets() {
        let header = PublicHeader::new(
            0x0102_0304_0506_0708,
            [0x11; 32],
            [0x22; 32],
            0x0A0B_0C0D,
            0x0040,
        );
        let bytes = header.to_bytes();

        assert_eq!(&bytes[0..2], &[0x00, 0x01]);
        assert_eq!(&bytes[2..10], &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
        assert_eq!(&bytes[10..42], &[0x11; 32]);
        assert_eq!(&bytes[42..74], &[0x22; 32]);
        assert_eq!(&bytes[74..78], &[0x0A, 0x0B, 0x0C, 0x0D]);
        assert_eq!(&bytes[78..80], &[0x00, 0x40]);
    }

    #[test]
    fn reject_short_buffer() {
        let result = PublicHeader::from_bytes(&[0u8; 79]);
        assert_eq!(
            result,
            Err(ProtocolError::HeaderTooShort { expected: 80, actual: 79 })
        );
    }

    #[test]
    fn reject_wrong_version() {
        let mut bytes = PublicHeader::new(1, [0; 32], [0; 32], 0, 64).to_bytes();
        bytes[0] = 0xFF;
        let result = PublicHeader::from_bytes(&bytes);
        assert_eq!(result, Err(ProtocolError::UnsupportedVersion(0xFF01)));
    }

    #[test]
    fn reject_odd_nsym() {
        let bytes = PublicHeader::new(1, [0; 32], [0; 32], 0, 63).to_bytes();
        assert_eq!(
            PublicHeader::from_bytes(&bytes),
            Err(ProtocolError::InvalidNsym(63))
        );
    }

    #[test]
    fn reject_out_of_range_nsym() {
        for nsym in [0u16, 30, 130, 256] {
            let bytes = PublicHeader::new(1, [0; 32], [0; 32], 0, nsym).to_bytes();
            assert_eq!(
                PublicHeader::from_bytes(&bytes),
                Err(ProtocolError::InvalidNsym(nsym)),
                "nsym {nsym} must be rejected"
            );
        }
    }
}
