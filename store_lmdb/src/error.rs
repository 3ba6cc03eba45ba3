use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database schema version {found} is newer than supported version {supported}")]
    SchemaTooNew { found: u32, supported: u32 },

    #[error("malformed schema version record")]
    BadSchemaRecord,
}

impl From<heed::Error> for LmdbError {
    fn from(e: heed::Error) -> Self {
        LmdbError::Heed(e.to_string())
    }
}

impl From<LmdbError> for tcr_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::BadSchemaRecord => tcr_store::StoreError::Corruption(e.to_string()),
            other => tcr_store::StoreError::Backend(other.to_string()),
        }
    }
}
