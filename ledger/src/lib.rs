//! Token ledger.
//!
//! The registry never holds tokens itself: deposits, bonds and stakes are
//! debited from the participant's account and later credited back (or to
//! someone else) through the [`Ledger`] trait. [`StoreLedger`] keeps balances
//! in the same key-value store as the registry, so a discarded transaction
//! rolls back its balance changes too.

pub mod error;
pub mod genesis;
pub mod ledger;

pub use error::LedgerError;
pub use genesis::{GenesisAccount, GenesisState};
pub use ledger::{Ledger, StoreLedger};
