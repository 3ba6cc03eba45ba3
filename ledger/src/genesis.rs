//! Initial balances.
//!
//! A genesis file is JSON of the form
//! `{"accounts": [{"address": "tcr_alice", "balance": 1000}]}`. The same shape
//! is produced by exporting a running node's balances.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tcr_store::{AccountStore, KvStore};
use tcr_types::AccountAddress;

use crate::{Ledger, LedgerError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub address: AccountAddress,
    pub balance: u128,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    #[serde(default)]
    pub accounts: Vec<GenesisAccount>,
}

impl GenesisState {
    pub fn from_json(raw: &str) -> Result<Self, LedgerError> {
        let state: GenesisState =
            serde_json::from_str(raw).map_err(|e| LedgerError::InvalidGenesis(e.to_string()))?;
        state.validate()?;
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, LedgerError> {
        serde_json::to_string_pretty(self).map_err(|e| LedgerError::InvalidGenesis(e.to_string()))
    }

    /// Every address listed once. Zero balances are allowed but pointless.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let mut seen = HashSet::new();
        for account in &self.accounts {
            if !seen.insert(&account.address) {
                return Err(LedgerError::InvalidGenesis(format!(
                    "duplicate account {}",
                    account.address
                )));
            }
        }
        self.total_supply()?;
        Ok(())
    }

    /// Sum of all balances; fails when it does not fit in a `u128`.
    pub fn total_supply(&self) -> Result<u128, LedgerError> {
        self.accounts.iter().try_fold(0u128, |acc, a| {
            acc.checked_add(a.balance)
                .ok_or_else(|| LedgerError::Overflow(a.address.to_string()))
        })
    }

    /// Credit every genesis balance.
    pub fn apply<L: Ledger + ?Sized>(&self, ledger: &L) -> Result<(), LedgerError> {
        self.validate()?;
        for account in &self.accounts {
            ledger.credit(&account.address, account.balance)?;
        }
        tracing::info!(
            accounts = self.accounts.len(),
            "genesis balances credited"
        );
        Ok(())
    }

    /// Snapshot every non-zero balance held in `store`.
    pub fn export<S: KvStore + ?Sized>(store: &S) -> Result<Self, LedgerError> {
        let accounts = store
            .iter_balances()?
            .into_iter()
            .map(|(address, balance)| GenesisAccount { address, balance })
            .collect();
        Ok(Self { accounts })
    }
}
