//! LMDB storage backend for the token-curated registry.
//!
//! Implements [`tcr_store::KvStore`] using the `heed` LMDB bindings. Each
//! [`tcr_store::Column`] maps to one named database within a single
//! environment, and a [`tcr_store::WriteBatch`] is applied in one LMDB write
//! transaction.

pub mod environment;
pub mod error;
pub mod integrity;

pub use environment::{LmdbEnvironment, DEFAULT_MAP_SIZE};
pub use error::LmdbError;
pub use integrity::{check_data_dir, check_integrity, IntegrityReport};
