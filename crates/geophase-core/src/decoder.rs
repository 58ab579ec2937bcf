//! Decoder pipeline: carrier to verdict.
//!
//! ```text
//! carrier ── slice codeword ── unpermute ── RS decode ── gate
//! ```
//!
//! The decoder rederives everything - associated data, key, permutation
//! seed - from its own context; the carrier contributes nothing but the
//! opaque payload. Error correction is best-effort: when it fails, the raw
//! uncorrected bytes go to the gate anyway. Declared lengths are trusted
//! arithmetic only; a false claim changes the associated data and the
//! block rejects.

use geophase_crypto::{
    MasterSecret, NONCE_LEN, derive_block_key, derive_nonce, derive_perm_seed, sha256,
};
use geophase_proto::PublicHeader;
use tracing::trace;

use crate::{
    chain::{binding_hash, state_digest},
    config::{NonceMode, SessionConfig},
    ecc::rs_decode,
    encoder::BlockContext,
    error::{InvalidInput, Result},
    gate::{VerifyResult, gate},
    interleave::unpermute,
};

/// Output of a decode attempt.
#[derive(Debug, Clone)]
pub struct DecodedBlock {
    /// The gate's verdict - the only acceptance signal there is
    pub verdict: VerifyResult,
    /// Commitment hash `H_t` over the recovered candidate ciphertext.
    /// Advanced regardless of the verdict: the chain records that block
    /// `t` was attempted.
    pub commitment: [u8; 32],
}

/// Decode one block.
///
/// Returns the gate's verdict. Transport trouble of every kind - noise
/// beyond the correction radius, truncation, a tampered header claim, the
/// wrong key - is a `Reject` verdict, never an error. [`InvalidInput`] is
/// reserved for calls that are malformed before any carrier byte is read.
///
/// # Errors
///
/// - [`InvalidInput::BadNsym`] / [`InvalidInput::FrameTooSmall`] for a
///   misconfigured session
/// - [`InvalidInput::PlaintextTooLarge`] when `declared_len` could never
///   fit a single codeword under the session's parity count
pub fn decode_block(
    carrier: &[u8],
    declared_len: u32,
    ctx: &BlockContext,
    master: &MasterSecret,
    config: &SessionConfig,
) -> Result<DecodedBlock> {
    config.validate()?;

    let declared = declared_len as usize;
    let max = config.max_plaintext_len();
    if declared > max {
        return Err(InvalidInput::PlaintextTooLarge { len: declared, max });
    }
    let codeword_len = config.codeword_len(declared);

    // Exactly codeword_len bytes are the codeword; the rest is padding and
    // is discarded unread. A carrier too short to slice yields a dummy
    // buffer that cannot authenticate.
    let slice: Vec<u8> = if carrier.len() >= codeword_len {
        carrier[..codeword_len].to_vec()
    } else {
        vec![0u8; codeword_len]
    };

    let seed = derive_perm_seed(&ctx.prev_hash, ctx.t);
    let coded = unpermute(&slice, &seed);

    // Correction is advisory. On failure the raw prefix goes forward; the
    // gate is the judge either way.
    let payload_len = codeword_len - config.nsym as usize;
    let payload =
        rs_decode(&coded, config.nsym as usize).unwrap_or_else(|| coded[..payload_len].to_vec());

    let key = derive_block_key(master, ctx.t, &ctx.prev_hash, config.kdf_mode);
    let nonce: [u8; NONCE_LEN] = match config.nonce_mode {
        NonceMode::Derived => derive_nonce(&key, ctx.t),
        NonceMode::Random => {
            // The carried nonce is authoritative; there is no fallback to
            // the derived value.
            let mut carried = [0u8; NONCE_LEN];
            carried.copy_from_slice(&payload[..NONCE_LEN]);
            carried
        },
    };
    let ciphertext = &payload[NONCE_LEN..];

    let digest = state_digest(&ctx.state);
    let header = PublicHeader::new(ctx.t, ctx.prev_hash, digest, declared_len, config.nsym);
    let ad = header.to_bytes();

    let verdict = gate(&key, &nonce, ciphertext, &ad);
    let commitment = binding_hash(&ctx.prev_hash, &sha256(ciphertext), &digest);

    trace!(t = ctx.t, accepted = verdict.is_accept(), "block decoded");

    Ok(DecodedBlock { verdict, commitment })
}
