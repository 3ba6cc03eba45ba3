use tcr_types::BlockHeight;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("ballot engine error: {0}")]
    Ballot(#[from] tcr_ballot::BallotError),

    #[error("ledger error: {0}")]
    Ledger(#[from] tcr_ledger::LedgerError),

    #[error("store error: {0}")]
    Store(#[from] tcr_store::StoreError),

    #[error("LMDB error: {0}")]
    Lmdb(#[from] tcr_store_lmdb::LmdbError),

    #[error("invalid parameters: {0}")]
    Params(#[from] tcr_types::TypesError),

    #[error("block height {requested} precedes last height {last}")]
    HeightRegression {
        last: BlockHeight,
        requested: BlockHeight,
    },

    #[error("no block has been started")]
    NoBlockStarted,

    #[error("genesis has already been applied")]
    GenesisAlreadyApplied,

    #[error("database integrity check failed: {0}")]
    Integrity(String),

    #[error("malformed block file: {0}")]
    BlockFile(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
