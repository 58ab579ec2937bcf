//! Geophase Cryptographic Primitives
//!
//! Cryptographic building blocks for the geophase transport. Pure functions
//! with deterministic outputs; random bytes, where a mode needs them, are
//! provided by the caller. This enables deterministic testing and keeps the
//! acceptance pipeline replayable.
//!
//! # Key Lifecycle
//!
//! Every block derives its own encryption key from the master secret, the
//! block index, and the previous commitment hash. Keys never repeat across
//! blocks and never live longer than one seal or open operation.
//!
//! ```text
//! Master Secret K*
//!        │
//!        ▼  (t, H_{t-1})
//! KDF → Block Key K_t        (Deterministic or HKDF mode)
//!        │
//!        ▼
//! Nonce N_t                  (derived, or caller-provided entropy)
//!        │
//!        ▼
//! ChaCha20-Poly1305 → nonce ‖ ciphertext ‖ tag
//! ```
//!
//! # Security
//!
//! - Key separation: `K_t` binds the block index and the chain position, so
//!   a key for block `t` verifies nothing at any other position.
//! - Domain separation: every hash invocation is prefixed with a fixed
//!   ASCII tag; no two uses share a preimage space.
//! - Authenticity: acceptance of a block reduces entirely to Poly1305 tag
//!   verification under the derived key and the public header bytes. No
//!   other mechanism in the system may authorize acceptance.
//! - Hygiene: master secrets and derived keys are zeroized on drop.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aead;
pub mod hash;
pub mod kdf;
pub mod secret;

pub use aead::{KEY_LEN, NONCE_LEN, TAG_LEN, open, seal};
pub use hash::{HASH_LEN, sha256, tagged_hash};
pub use kdf::{KdfMode, derive_block_key, derive_nonce, derive_pad, derive_perm_seed};
pub use secret::{BlockKey, MasterSecret};
