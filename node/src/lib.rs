//! Registry node: wires the ballot engine to storage and the ledger.
//!
//! The node is the execution context the engine assumes:
//! - Applies genesis balances once
//! - Tracks the block height, which never decreases
//! - Runs each transaction in its own write cache, committing only on success
//! - Answers read-only queries over ballots, listings, balances and the queue

pub mod app;
pub mod block;
pub mod config;
pub mod error;
pub mod receipt;

pub use app::{open_lmdb_app, RegistryApp};
pub use block::Block;
pub use config::{NodeConfig, ParamOverrides};
pub use error::NodeError;
pub use receipt::{TxEffect, TxReceipt};
