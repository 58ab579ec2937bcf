//! Commitment hash chain.
//!
//! Each block publishes two hashes:
//!
//! - the commitment `H_t = H("GP/H_t" ‖ H_{t-1} ‖ H(C_t) ‖ g_t)`, binding
//!   chain position, ciphertext identity, and public state;
//! - the availability witness `A_t = H("GP/A_t" ‖ H_{t-1} ‖ g_t ‖ P_t)`,
//!   public evidence of what was claimed at step `t`, independent of any
//!   secret.
//!
//! The chain is pure bookkeeping over public data. It never sees plaintext,
//! never sees keys, and never consumes transport results; only the digest
//! of the ciphertext enters it. Advancing is strictly sequential - there is
//! no skip and no rewind.

use geophase_crypto::{HASH_LEN, hash::tags, sha256, tagged_hash};
use geophase_proto::{PublicHeader, StructuredState};

use crate::error::{InvalidInput, Result};

/// Position and head hash of a commitment chain.
///
/// Owned by the caller and passed by value; the core retains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainState {
    t: u64,
    hash: [u8; HASH_LEN],
}

/// Result of a successful chain advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainAdvance {
    /// The new chain head, positioned at the advanced block
    pub next: ChainState,
    /// Availability witness `A_t` for the advanced block
    pub witness: [u8; HASH_LEN],
}

impl ChainState {
    /// The genesis state: position 0, head `H("GP/genesis")`. Block
    /// indices start at 1; index 0 belongs to genesis and is never a block.
    #[must_use]
    pub fn genesis() -> Self {
        Self { t: 0, hash: tagged_hash(tags::GENESIS, &[]) }
    }

    /// Reconstruct a persisted chain head. Callers that store `(t, H_t)`
    /// re-enter here.
    #[must_use]
    pub fn resume(t: u64, hash: [u8; HASH_LEN]) -> Self {
        Self { t, hash }
    }

    /// Index of the chain head (0 for genesis).
    #[must_use]
    pub fn block_index(&self) -> u64 {
        self.t
    }

    /// Head hash `H_t` (the `H_{t-1}` of the next block).
    #[must_use]
    pub fn hash(&self) -> &[u8; HASH_LEN] {
        &self.hash
    }

    /// Advance the chain by one block.
    ///
    /// Validates that the header sits exactly one position past the head,
    /// chains from the head hash, and carries the digest of the supplied
    /// state. Then computes `H_t` and `A_t` from the ciphertext digest.
    ///
    /// The ciphertext digest is whatever the carrier produced - the chain
    /// records that block `t` was attempted, whether or not it verifies.
    ///
    /// # Errors
    ///
    /// - [`InvalidInput::NonMonotonicIndex`] unless `header.t == self.t + 1`
    /// - [`InvalidInput::PrevHashMismatch`] unless the header chains from
    ///   this head
    /// - [`InvalidInput::StateDigestMismatch`] unless the header carries
    ///   `H(canonical(state))`
    pub fn advance(
        &self,
        header: &PublicHeader,
        state: &StructuredState,
        ciphertext_digest: &[u8; HASH_LEN],
    ) -> Result<ChainAdvance> {
        let t = header.block_index();
        let expected = self.t.wrapping_add(1);
        if t != expected {
            return Err(InvalidInput::NonMonotonicIndex { expected, got: t });
        }
        if header.prev_hash() != &self.hash {
            return Err(InvalidInput::PrevHashMismatch { t });
        }

        let digest = state_digest(state);
        if header.state_digest() != &digest {
            return Err(InvalidInput::StateDigestMismatch { t });
        }

        let commitment = binding_hash(&self.hash, ciphertext_digest, &digest);
        let witness = availability_witness(&self.hash, &digest, &header.to_bytes());

        Ok(ChainAdvance {
            next: Self { t, hash: commitment },
            witness,
        })
    }
}

/// State digest `g_t = H(canonical(D_t))`.
#[must_use]
pub fn state_digest(state: &StructuredState) -> [u8; HASH_LEN] {
    sha256(&state.canonical_bytes())
}

/// Commitment hash `H_t = H("GP/H_t" ‖ H_{t-1} ‖ H(C_t) ‖ g_t)`.
#[must_use]
pub fn binding_hash(
    prev_hash: &[u8; HASH_LEN],
    ciphertext_digest: &[u8; HASH_LEN],
    state_digest: &[u8; HASH_LEN],
) -> [u8; HASH_LEN] {
    tagged_hash(tags::COMMITMENT, &[prev_hash, ciphertext_digest, state_digest])
}

/// Availability witness `A_t = H("GP/A_t" ‖ H_{t-1} ‖ g_t ‖ P_t)`.
#[must_use]
pub fn availability_witness(
    prev_hash: &[u8; HASH_LEN],
    state_digest: &[u8; HASH_LEN],
    header_bytes: &[u8; PublicHeader::SIZE],
) -> [u8; HASH_LEN] {
    tagged_hash(tags::WITNESS, &[prev_hash, state_digest, header_bytes])
}

/// Check claimed commitments against recomputed values.
///
/// Auditors holding the public inputs can confirm that `H_t` and `A_t`
/// were honestly derived. This verifies bookkeeping only; it says nothing
/// about whether the block's ciphertext authenticates.
#[must_use]
pub fn verify_commitment(
    claimed_commitment: &[u8; HASH_LEN],
    claimed_witness: &[u8; HASH_LEN],
    prev_hash: &[u8; HASH_LEN],
    state_digest: &[u8; HASH_LEN],
    ciphertext_digest: &[u8; HASH_LEN],
    header_bytes: &[u8; PublicHeader::SIZE],
) -> bool {
    let commitment = binding_hash(prev_hash, ciphertext_digest, state_digest);
    let witness = availability_witness(prev_hash, state_digest, header_bytes);
    claimed_commitment == &commitment && claimed_witness == &witness
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> StructuredState {
        let mut state = StructuredState::new();
        state.set_u64("v", 1);
        state
    }

    fn header_for(chain: &ChainState, state: &StructuredState) -> PublicHeader {
        PublicHeader::new(
            chain.block_index() + 1,
            *chain.hash(),
            state_digest(state),
            11,
            64,
        )
    }

    #[test]
    fn genesis_is_the_tagged_constant() {
        let genesis = ChainState::genesis();
        assert_eq!(genesis.block_index(), 0);
        assert_eq!(genesis.hash(), &sha256(b"GP/genesis"));
    }

    #[test]
    fn advance_moves_head_by_one() {
        let genesis = ChainState::genesis();
        let state = test_state();
        let header = header_for(&genesis, &state);

        let advanced = genesis.advance(&header, &state, &[0xCC; 32]).unwrap();
        assert_eq!(advanced.next.block_index(), 1);
        assert_ne!(advanced.next.hash(), genesis.hash());
    }

    #[test]
    fn advance_is_deterministic() {
        let genesis = ChainState::genesis();
        let state = test_state();
        let header = header_for(&genesis, &state);

        let a = genesis.advance(&header, &state, &[0xCC; 32]).unwrap();
        let b = genesis.advance(&header, &state, &[0xCC; 32]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reject_skipped_index() {
        let genesis = ChainState::genesis();
        let state = test_state();
        let header = PublicHeader::new(2, *genesis.hash(), state_digest(&state), 11, 64);

        assert_eq!(
            genesis.advance(&header, &state, &[0; 32]),
            Err(InvalidInput::NonMonotonicIndex { expected: 1, got: 2 })
        );
    }

    #[test]
    fn reject_rewound_index() {
        let genesis = ChainState::genesis();
        let state = test_state();
        let header = header_for(&genesis, &state);
        let advanced = genesis.advance(&header, &state, &[0; 32]).unwrap();

        // Replaying block 1 against the advanced head must fail.
        assert_eq!(
            advanced.next.advance(&header, &state, &[0; 32]),
            Err(InvalidInput::NonMonotonicIndex { expected: 2, got: 1 })
        );
    }

    #[test]
    fn reject_foreign_prev_hash() {
        let genesis = ChainState::genesis();
        let state = test_state();
        let header = PublicHeader::new(1, [0xEE; 32], state_digest(&state), 11, 64);

        assert_eq!(
            genesis.advance(&header, &state, &[0; 32]),
            Err(InvalidInput::PrevHashMismatch { t: 1 })
        );
    }

    #[test]
    fn reject_wrong_state_digest() {
        let genesis = ChainState::genesis();
        let state = test_state();
        let mut other = StructuredState::new();
        other.set_u64("v", 2);
        let header = header_for(&genesis, &other);

        assert_eq!(
            genesis.advance(&header, &state, &[0; 32]),
            Err(InvalidInput::StateDigestMismatch { t: 1 })
        );
    }

    #[test]
    fn ciphertext_digest_changes_commitment_but_not_witness() {
        let genesis = ChainState::genesis();
        let state = test_state();
        let header = header_for(&genesis, &state);

        let a = genesis.advance(&header, &state, &[0x01; 32]).unwrap();
        let b = genesis.advance(&header, &state, &[0x02; 32]).unwrap();
        assert_ne!(a.next.hash(), b.next.hash());
        assert_eq!(a.witness, b.witness);
    }

    #[test]
    fn verify_commitment_accepts_honest_values() {
        let genesis = ChainState::genesis();
        let state = test_state();
        let header = header_for(&genesis, &state);
        let ct_digest = [0xAB; 32];
        let advanced = genesis.advance(&header, &state, &ct_digest).unwrap();

        assert!(verify_commitment(
            advanced.next.hash(),
            &advanced.witness,
            genesis.hash(),
            &state_digest(&state),
            &ct_digest,
            &header.to_bytes(),
        ));
    }

    #[test]
    fn verify_commitment_rejects_tampered_values() {
        let genesis = ChainState::genesis();
        let state = test_state();
        let header = header_for(&genesis, &state);
        let ct_digest = [0xAB; 32];
        let advanced = genesis.advance(&header, &state, &ct_digest).unwrap();

        let mut forged = *advanced.next.hash();
        forged[0] ^= 1;
        assert!(!verify_commitment(
            &forged,
            &advanced.witness,
            genesis.hash(),
            &state_digest(&state),
            &ct_digest,
            &header.to_bytes(),
        ));
    }

    #[test]
    fn resume_round_trips_persisted_head() {
        let genesis = ChainState::genesis();
        let state = test_state();
        let header = header_for(&genesis, &state);
        let advanced = genesis.advance(&header, &state, &[7; 32]).unwrap();

        let resumed = ChainState::resume(advanced.next.block_index(), *advanced.next.hash());
        assert_eq!(resumed, advanced.next);
    }
}
