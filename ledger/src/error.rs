use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("balance overflow for account {0}")]
    Overflow(String),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error("storage error: {0}")]
    Storage(#[from] tcr_store::StoreError),
}
