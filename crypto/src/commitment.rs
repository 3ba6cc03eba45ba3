//! Commit-reveal vote commitments.
//!
//! A voter first publishes `SHA-256(encode(vote) ‖ nonce)` and later opens it
//! by revealing the vote and the nonce. The vote stays secret for as long as
//! the nonce does, so nonces must come from the voter's own entropy.

use crate::hash::sha256_multi;
use crate::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of a commitment digest.
pub const COMMITMENT_LEN: usize = 32;

/// Recommended nonce length for [`generate_nonce`].
pub const NONCE_LEN: usize = 32;

/// A hidden vote.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment([u8; COMMITMENT_LEN]);

impl Commitment {
    pub fn new(bytes: [u8; COMMITMENT_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a commitment from bytes received on the wire.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; COMMITMENT_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidCommitmentLength {
                    expected: COMMITMENT_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; COMMITMENT_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..4]))
    }
}

/// Canonical one-byte encoding of a vote.
pub fn encode_vote(vote: bool) -> [u8; 1] {
    [u8::from(vote)]
}

/// Commit to `vote` under `nonce`.
pub fn commit_vote(vote: bool, nonce: &[u8]) -> Commitment {
    Commitment(sha256_multi(&[&encode_vote(vote), nonce]))
}

/// Check that `(vote, nonce)` opens `commitment`.
///
/// Accepts the raw stored bytes so that a stored value of the wrong length
/// simply fails to verify.
pub fn verify_vote(commitment: &[u8], vote: bool, nonce: &[u8]) -> bool {
    commit_vote(vote, nonce).as_bytes().as_slice() == commitment
}

/// Fresh random nonce from the operating system.
pub fn generate_nonce() -> Result<[u8; NONCE_LEN], CryptoError> {
    let mut nonce = [0u8; NONCE_LEN];
    getrandom::getrandom(&mut nonce).map_err(|e| CryptoError::Entropy(e.to_string()))?;
    Ok(nonce)
}
