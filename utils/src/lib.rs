//! Shared utilities for the token-curated registry.

pub mod logging;

pub use logging::{init_logging, LogFormat};
