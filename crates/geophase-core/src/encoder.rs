//! Encoder pipeline: plaintext to carrier.
//!
//! ```text
//! plaintext ── AEAD seal ── nonce ‖ ct ── RS encode ── permute ── ‖ pad
//! ```
//!
//! With the deterministic KDF mode and a derived nonce, the whole pipeline
//! is a pure function of `(plaintext, t, H_{t-1}, D_t, K*)`: two
//! invocations produce byte-identical carriers.

use bytes::{BufMut, Bytes, BytesMut};
use geophase_crypto::{
    MasterSecret, NONCE_LEN, derive_block_key, derive_nonce, derive_pad, derive_perm_seed, seal,
    sha256,
};
use geophase_proto::{PublicHeader, StructuredState};
use tracing::trace;

use crate::{
    chain::{ChainState, availability_witness, binding_hash, state_digest},
    config::{NonceMode, SessionConfig},
    ecc::rs_encode,
    error::{InvalidInput, Result},
    interleave::permute,
};

/// Everything public that situates a block in its chain.
///
/// The same context drives both sides: the encoder to build a carrier, the
/// decoder to rederive the exact associated data and key. Contexts carry no
/// secrets.
#[derive(Debug, Clone)]
pub struct BlockContext {
    /// Block index `t` (1 is the first block after genesis)
    pub t: u64,
    /// Previous commitment hash `H_{t-1}`
    pub prev_hash: [u8; 32],
    /// Public structured state `D_t`
    pub state: StructuredState,
    /// Fresh nonce entropy; required exactly when the session runs in
    /// random-nonce mode. The decoder ignores this field and uses the
    /// nonce carried in the codeword.
    pub fresh_nonce: Option<[u8; NONCE_LEN]>,
}

impl BlockContext {
    /// Context for a block at an explicit chain position.
    #[must_use]
    pub fn new(t: u64, prev_hash: [u8; 32], state: StructuredState) -> Self {
        Self { t, prev_hash, state, fresh_nonce: None }
    }

    /// Context for the block immediately after a chain head.
    #[must_use]
    pub fn next(chain: &ChainState, state: StructuredState) -> Self {
        Self::new(chain.block_index() + 1, *chain.hash(), state)
    }

    /// Attach caller-provided nonce entropy for random-nonce sessions.
    #[must_use]
    pub fn with_fresh_nonce(mut self, nonce: [u8; NONCE_LEN]) -> Self {
        self.fresh_nonce = Some(nonce);
        self
    }
}

/// Output of a successful encode.
#[derive(Debug, Clone)]
pub struct EncodedBlock {
    /// The full carrier frame: permuted codeword followed by padding
    pub carrier: Bytes,
    /// The public header `P_t` whose bytes were bound as associated data
    pub header: PublicHeader,
    /// Commitment hash `H_t` - the next block's `H_{t-1}`
    pub commitment: [u8; 32],
    /// Availability witness `A_t`
    pub witness: [u8; 32],
}

/// Encode one block.
///
/// # Errors
///
/// - [`InvalidInput::BadNsym`] / [`InvalidInput::FrameTooSmall`] for a
///   misconfigured session
/// - [`InvalidInput::PlaintextTooLarge`] when the message exceeds the
///   single-codeword capacity for the session's parity count
/// - [`InvalidInput::MissingFreshNonce`] /
///   [`InvalidInput::UnexpectedFreshNonce`] when the context's nonce
///   entropy disagrees with the session's nonce mode
pub fn encode_block(
    plaintext: &[u8],
    ctx: &BlockContext,
    master: &MasterSecret,
    config: &SessionConfig,
) -> Result<EncodedBlock> {
    config.validate()?;

    let max = config.max_plaintext_len();
    if plaintext.len() > max {
        return Err(InvalidInput::PlaintextTooLarge { len: plaintext.len(), max });
    }
    let codeword_len = config.codeword_len(plaintext.len());
    if config.frame_size < codeword_len {
        return Err(InvalidInput::FrameTooSmall {
            frame: config.frame_size,
            required: codeword_len,
        });
    }

    let key = derive_block_key(master, ctx.t, &ctx.prev_hash, config.kdf_mode);
    let nonce = match config.nonce_mode {
        NonceMode::Derived => {
            if ctx.fresh_nonce.is_some() {
                return Err(InvalidInput::UnexpectedFreshNonce);
            }
            derive_nonce(&key, ctx.t)
        },
        NonceMode::Random => ctx.fresh_nonce.ok_or(InvalidInput::MissingFreshNonce)?,
    };

    // INVARIANT: plaintext length fits in u32 - bounded above by the
    // single-codeword capacity checked a few lines up.
    let digest = state_digest(&ctx.state);
    let header =
        PublicHeader::new(ctx.t, ctx.prev_hash, digest, plaintext.len() as u32, config.nsym);
    let ad = header.to_bytes();

    let ciphertext = seal(&key, &nonce, plaintext, &ad);

    // The nonce travels with the ciphertext in both modes; in derived mode
    // it is redundant but keeps the framing uniform.
    let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&ciphertext);

    let coded = rs_encode(&payload, config.nsym as usize);
    let seed = derive_perm_seed(&ctx.prev_hash, ctx.t);
    let permuted = permute(&coded, &seed);
    debug_assert_eq!(permuted.len(), codeword_len);

    let pad = derive_pad(&ctx.prev_hash, ctx.t, config.frame_size - codeword_len);

    let mut carrier = BytesMut::with_capacity(config.frame_size);
    carrier.put_slice(&permuted);
    carrier.put_slice(&pad);

    let ciphertext_digest = sha256(&ciphertext);
    let commitment = binding_hash(&ctx.prev_hash, &ciphertext_digest, &digest);
    let witness = availability_witness(&ctx.prev_hash, &digest, &ad);

    trace!(t = ctx.t, plaintext_len = plaintext.len(), "block encoded");

    Ok(EncodedBlock { carrier: carrier.freeze(), header, commitment, witness })
}
