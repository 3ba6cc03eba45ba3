use crate::codec::{decode_amount, encode_amount};
use crate::{Column, KvStore, StoreError};
use tcr_types::AccountAddress;

/// Token balances, keyed by address. An absent account has balance zero.
pub trait AccountStore: KvStore {
    fn get_balance(&self, address: &AccountAddress) -> Result<u128, StoreError> {
        match self.get(Column::Accounts, address.as_bytes())? {
            Some(bytes) => decode_amount(&bytes),
            None => Ok(0),
        }
    }

    /// Zero balances are deleted rather than stored.
    fn put_balance(&self, address: &AccountAddress, balance: u128) -> Result<(), StoreError> {
        if balance == 0 {
            self.delete(Column::Accounts, address.as_bytes())
        } else {
            self.put(Column::Accounts, address.as_bytes(), &encode_amount(balance))
        }
    }

    /// Every non-zero balance in address order.
    fn iter_balances(&self) -> Result<Vec<(AccountAddress, u128)>, StoreError> {
        self.scan(Column::Accounts)?
            .into_iter()
            .map(|(key, value)| {
                let raw = String::from_utf8(key)
                    .map_err(|_| StoreError::Corruption("account key is not utf-8".into()))?;
                let address = AccountAddress::parse(&raw)
                    .map_err(|e| StoreError::Corruption(e.to_string()))?;
                Ok((address, decode_amount(&value)?))
            })
            .collect()
    }
}

impl<T: KvStore + ?Sized> AccountStore for T {}
