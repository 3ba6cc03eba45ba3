//! Cryptographic primitives for the token-curated registry.
//!
//! - **SHA-256** for hashing
//! - **Commit-reveal** vote commitments: `SHA-256(encode(vote) ‖ nonce)`
//! - Nonce generation from OS entropy for voting clients

pub mod commitment;
pub mod error;
pub mod hash;

pub use commitment::{commit_vote, encode_vote, generate_nonce, verify_vote, Commitment};
pub use error::CryptoError;
pub use hash::{sha256, sha256_multi};
