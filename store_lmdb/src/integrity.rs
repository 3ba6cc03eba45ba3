//! LMDB database integrity checks.
//!
//! Run on startup to detect corruption early, before the node applies
//! any block.

use std::path::Path;

use tcr_store::Column;

use crate::{LmdbEnvironment, LmdbError};

/// Summary of an integrity check run.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub databases_checked: u32,
    pub total_entries: u64,
    pub errors: Vec<String>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Count the entries of every column database.
///
/// Read failures are recorded in the report rather than returned.
pub fn check_integrity(lmdb: &LmdbEnvironment) -> Result<IntegrityReport, LmdbError> {
    let env = lmdb.env();
    let mut report = IntegrityReport::default();
    let rtxn = env.read_txn()?;

    for column in Column::ALL {
        let name = column.name();
        match env.open_database::<heed::types::Bytes, heed::types::Bytes>(&rtxn, Some(name)) {
            Ok(Some(db)) => {
                report.databases_checked += 1;
                match db.len(&rtxn) {
                    Ok(count) => report.total_entries += count,
                    Err(e) => report
                        .errors
                        .push(format!("failed to read database '{name}': {e}")),
                }
            }
            Ok(None) => report.errors.push(format!("database '{name}' is missing")),
            Err(e) => report
                .errors
                .push(format!("failed to open database '{name}': {e}")),
        }
    }

    if !report.is_healthy() {
        tracing::warn!(errors = report.errors.len(), "LMDB integrity check failed");
    }
    Ok(report)
}

/// Check that a data directory looks usable before opening it.
///
/// A missing directory is a fresh start. An existing directory without
/// `data.mdb` suggests the wrong path or a damaged environment.
pub fn check_data_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Ok(());
    }
    let data_file = path.join("data.mdb");
    if !data_file.exists() {
        return Err(format!(
            "LMDB directory exists but data.mdb is missing at {}",
            path.display()
        ));
    }
    Ok(())
}
