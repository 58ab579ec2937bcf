//! Key material containers.
//!
//! Both types zeroize on drop. How the 32 bytes of master material are
//! acquired - provisioning, KMS, test vector - is the caller's problem and
//! deliberately outside this crate.

use zeroize::Zeroize;

use crate::aead::KEY_LEN;

/// The long-lived master secret `K*` (256 bits).
///
/// Read-only input to the key schedule; never mutated, never serialized by
/// the core. Zeroized on drop.
#[derive(Clone)]
pub struct MasterSecret {
    bytes: [u8; KEY_LEN],
}

impl MasterSecret {
    /// Wrap 32 bytes of externally-acquired key material.
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Raw key material, for the key schedule only.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl Drop for MasterSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterSecret(..)")
    }
}

/// A per-block encryption key `K_t`.
///
/// Derived, used for exactly one block, then dropped. Zeroized on drop.
#[derive(Clone)]
pub struct BlockKey {
    key: [u8; KEY_LEN],
}

impl BlockKey {
    pub(crate) fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Symmetric key for the AEAD layer.
    #[must_use]
    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl Drop for BlockKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl std::fmt::Debug for BlockKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BlockKey(..)")
    }
}
