use tcr_store::{AccountStore, KvStore};
use tcr_types::AccountAddress;

use crate::LedgerError;

/// Balance operations the registry relies on.
///
/// `debit` never takes more than the account holds and leaves the balance
/// untouched on failure.
pub trait Ledger {
    fn balance(&self, account: &AccountAddress) -> Result<u128, LedgerError>;

    fn debit(&self, account: &AccountAddress, amount: u128) -> Result<(), LedgerError>;

    fn credit(&self, account: &AccountAddress, amount: u128) -> Result<(), LedgerError>;

    fn has_funds(&self, account: &AccountAddress, amount: u128) -> Result<bool, LedgerError> {
        Ok(self.balance(account)? >= amount)
    }
}

impl<L: Ledger + ?Sized> Ledger for &L {
    fn balance(&self, account: &AccountAddress) -> Result<u128, LedgerError> {
        (**self).balance(account)
    }

    fn debit(&self, account: &AccountAddress, amount: u128) -> Result<(), LedgerError> {
        (**self).debit(account, amount)
    }

    fn credit(&self, account: &AccountAddress, amount: u128) -> Result<(), LedgerError> {
        (**self).credit(account, amount)
    }
}

/// Ledger backed by the `Accounts` column of a key-value store.
pub struct StoreLedger<S> {
    store: S,
}

impl<S: KvStore> StoreLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KvStore> Ledger for StoreLedger<S> {
    fn balance(&self, account: &AccountAddress) -> Result<u128, LedgerError> {
        Ok(self.store.get_balance(account)?)
    }

    fn debit(&self, account: &AccountAddress, amount: u128) -> Result<(), LedgerError> {
        let available = self.store.get_balance(account)?;
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds {
                needed: amount,
                available,
            })?;
        self.store.put_balance(account, remaining)?;
        tracing::trace!(account = %account, amount, remaining, "debit");
        Ok(())
    }

    fn credit(&self, account: &AccountAddress, amount: u128) -> Result<(), LedgerError> {
        let current = self.store.get_balance(account)?;
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(account.to_string()))?;
        self.store.put_balance(account, updated)?;
        tracing::trace!(account = %account, amount, balance = updated, "credit");
        Ok(())
    }
}
