//! Abstract storage for the token-curated registry.
//!
//! Every storage backend (LMDB, in-memory for testing) implements [`KvStore`]:
//! a byte-oriented key-value space split into [`Column`]s. The typed stores
//! (`BallotStore`, `ListingStore`, ...) are extension traits available on
//! every `KvStore`, so the rest of the codebase depends only on the traits.
//!
//! [`CacheStore`] is the commit boundary: it buffers every write of one
//! transaction and flushes them to the backend as a single [`WriteBatch`].

pub mod account;
pub mod ballot;
pub mod cache;
pub mod codec;
pub mod column;
pub mod commitment;
pub mod error;
pub mod keys;
pub mod kv;
pub mod listing;
pub mod meta;
pub mod queue;
pub mod vote;
pub mod write_batch;

#[cfg(test)]
mod testing;

pub use account::AccountStore;
pub use ballot::BallotStore;
pub use cache::CacheStore;
pub use codec::{decode, encode, Record};
pub use column::Column;
pub use commitment::CommitmentStore;
pub use error::StoreError;
pub use kv::KvStore;
pub use listing::ListingStore;
pub use meta::MetaStore;
pub use queue::QueueStore;
pub use vote::VoteStore;
pub use write_batch::{WriteBatch, WriteOp};
