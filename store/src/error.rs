use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key not found: {0}")]
    NotFound(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// A persisted record failed to decode. The store no longer matches what
    /// was written, so callers must stop rather than continue on bad state.
    #[error("database is corrupted: {0}")]
    Corruption(String),
}

impl StoreError {
    /// Whether this error indicates damaged persistent state.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Corruption(_))
    }
}
