//! Nullable ledger: in-memory balances for engine tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use tcr_ledger::{Ledger, LedgerError};
use tcr_store::StoreError;
use tcr_types::AccountAddress;

#[derive(Default)]
pub struct NullLedger {
    balances: Mutex<BTreeMap<AccountAddress, u128>>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balances<I>(balances: I) -> Self
    where
        I: IntoIterator<Item = (AccountAddress, u128)>,
    {
        Self {
            balances: Mutex::new(balances.into_iter().collect()),
        }
    }

    pub fn set_balance(&self, account: &AccountAddress, amount: u128) {
        if let Ok(mut balances) = self.lock() {
            balances.insert(account.clone(), amount);
        }
    }

    /// Sum of every balance.
    pub fn total(&self) -> u128 {
        self.lock()
            .map(|b| b.values().copied().sum())
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<AccountAddress, u128>>, LedgerError> {
        self.balances.lock().map_err(|_| {
            LedgerError::Storage(StoreError::Backend("null ledger lock poisoned".into()))
        })
    }
}

impl Ledger for NullLedger {
    fn balance(&self, account: &AccountAddress) -> Result<u128, LedgerError> {
        Ok(self.lock()?.get(account).copied().unwrap_or(0))
    }

    fn debit(&self, account: &AccountAddress, amount: u128) -> Result<(), LedgerError> {
        let mut balances = self.lock()?;
        let available = balances.get(account).copied().unwrap_or(0);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds {
                needed: amount,
                available,
            })?;
        balances.insert(account.clone(), remaining);
        Ok(())
    }

    fn credit(&self, account: &AccountAddress, amount: u128) -> Result<(), LedgerError> {
        let mut balances = self.lock()?;
        let current = balances.get(account).copied().unwrap_or(0);
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(account.to_string()))?;
        balances.insert(account.clone(), updated);
        Ok(())
    }
}
