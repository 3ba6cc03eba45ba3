//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies of the registry (block height, storage, token
//! ledger, nonce randomness) sit behind traits or plain values. This crate
//! provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem
//!
//! Usage: swap real implementations for nullables in tests.

pub mod chain;
pub mod ledger;
pub mod random;
pub mod store;

pub use chain::NullChain;
pub use ledger::NullLedger;
pub use random::NullNonces;
pub use store::NullStore;
