//! Authenticated encryption using ChaCha20-Poly1305 (RFC 8439).
//!
//! 256-bit key, 96-bit nonce, 128-bit tag, with associated data. The entire
//! acceptance decision of the transport reduces to [`open`]: a candidate
//! ciphertext either verifies under the derived key and the public header
//! bytes, or it does not. There is no partial success.

use chacha20poly1305::{
    ChaCha20Poly1305, Nonce,
    aead::{Aead, KeyInit, Payload},
};

use crate::secret::BlockKey;

/// AEAD key length (256 bits).
pub const KEY_LEN: usize = 32;

/// AEAD nonce length (96 bits, RFC 8439).
pub const NONCE_LEN: usize = 12;

/// Poly1305 tag length (128 bits).
pub const TAG_LEN: usize = 16;

/// Encrypt and authenticate a plaintext under associated data.
///
/// Returns `ciphertext ‖ tag`, exactly `plaintext.len() + TAG_LEN` bytes.
///
/// # Security
///
/// The caller guarantees nonce uniqueness per key. Inside this system that
/// holds by construction: keys are unique per `(t, H_{t-1})`, and the nonce
/// is either derived from the key or supplied as fresh entropy.
#[must_use]
pub fn seal(key: &BlockKey, nonce: &[u8; NONCE_LEN], plaintext: &[u8], ad: &[u8]) -> Vec<u8> {
    let cipher = ChaCha20Poly1305::new(key.key().into());

    let Ok(ciphertext) = cipher.encrypt(
        Nonce::from_slice(nonce),
        Payload { msg: plaintext, aad: ad },
    ) else {
        unreachable!("ChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    ciphertext
}

/// Decrypt and verify `ciphertext ‖ tag` under associated data.
///
/// Returns the plaintext only if the tag verifies; `None` otherwise. A
/// wrong key, a tampered ciphertext, altered associated data, and a
/// truncated input are all the same `None` - by contract, nothing upstream
/// may distinguish them.
#[must_use]
pub fn open(
    key: &BlockKey,
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    ad: &[u8],
) -> Option<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new(key.key().into());

    cipher
        .decrypt(Nonce::from_slice(nonce), Payload { msg: ciphertext, aad: ad })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        kdf::{KdfMode, derive_block_key},
        secret::MasterSecret,
    };

    fn test_key() -> BlockKey {
        let master = MasterSecret::from_bytes([7; 32]);
        derive_block_key(&master, 1, &[0; 32], KdfMode::Deterministic)
    }

    #[test]
    fn seal_open_round_trip() {
        let key = test_key();
        let nonce = [0xAB; NONCE_LEN];
        let ad = b"public header bytes";

        let ct = seal(&key, &nonce, b"hello world", ad);
        assert_eq!(ct.len(), 11 + TAG_LEN);

        let pt = open(&key, &nonce, &ct, ad).expect("should verify");
        assert_eq!(pt, b"hello world");
    }

    #[test]
    fn empty_plaintext_round_trip() {
        let key = test_key();
        let nonce = [0; NONCE_LEN];
        let ct = seal(&key, &nonce, b"", b"ad");
        assert_eq!(ct.len(), TAG_LEN);
        assert_eq!(open(&key, &nonce, &ct, b"ad").unwrap(), b"");
    }

    #[test]
    fn altered_ad_fails() {
        let key = test_key();
        let nonce = [0; NONCE_LEN];
        let ct = seal(&key, &nonce, b"payload", b"ad-1");
        assert!(open(&key, &nonce, &ct, b"ad-2").is_none());
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let key = test_key();
        let nonce = [0; NONCE_LEN];
        let mut ct = seal(&key, &nonce, b"payload", b"ad");
        ct[0] ^= 0x01;
        assert!(open(&key, &nonce, &ct, b"ad").is_none());
    }

    #[test]
    fn wrong_key_fails() {
        let nonce = [0; NONCE_LEN];
        let ct = seal(&test_key(), &nonce, b"payload", b"ad");

        let other = derive_block_key(
            &MasterSecret::from_bytes([8; 32]),
            1,
            &[0; 32],
            KdfMode::Deterministic,
        );
        assert!(open(&other, &nonce, &ct, b"ad").is_none());
    }

    #[test]
    fn truncated_input_fails() {
        let key = test_key();
        let nonce = [0; NONCE_LEN];
        let ct = seal(&key, &nonce, b"payload", b"ad");
        assert!(open(&key, &nonce, &ct[..ct.len() - 1], b"ad").is_none());
        assert!(open(&key, &nonce, &[], b"ad").is_none());
    }
}
