//! LMDB environment setup and the `KvStore` implementation.

use std::ops::Bound;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use tcr_store::{Column, KvStore, StoreError, WriteBatch, WriteOp};

use crate::LmdbError;

/// Default LMDB map size (1 GiB). LMDB reserves address space, not disk.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

/// Schema version written by this code.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";

type Table = Database<Bytes, Bytes>;

/// Wraps the LMDB environment and one database handle per column.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    tables: [Table; Column::ALL.len()],
    path: PathBuf,
}

impl LmdbEnvironment {
    /// Open or create an environment at `path`, creating every column's
    /// database and stamping the schema version on first open.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per process and path; the
        // node never opens the same directory twice concurrently.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(Column::ALL.len() as u32)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let mut tables = Vec::with_capacity(Column::ALL.len());
        for column in Column::ALL {
            let db: Table = env.create_database(&mut wtxn, Some(column.name()))?;
            tables.push(db);
        }
        let tables: [Table; Column::ALL.len()] = tables
            .try_into()
            .map_err(|_| LmdbError::Heed("column table count mismatch".into()))?;

        let meta = tables[Column::Meta as usize];
        let stored = meta.get(&wtxn, SCHEMA_VERSION_KEY)?.map(|b| b.to_vec());
        match stored {
            None => {
                meta.put(&mut wtxn, SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_be_bytes())?;
            }
            Some(bytes) => {
                let arr: [u8; 4] = bytes
                    .as_slice()
                    .try_into().map_err(|_| LmdbError::BadSchemaRecord)?;
                let found = u32::from_be_bytes(arr);
                if found > SCHEMA_VERSION {
                    return Err(LmdbError::SchemaTooNew {
                        found,
                        supported: SCHEMA_VERSION,
                    });
                }
            }
        }
        wtxn.commit()?;

        tracing::info!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(Self {
            env: Arc::new(env),
            tables,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn env(&self) -> &Arc<Env> {
        &self.env
    }

    fn table(&self, column: Column) -> Table {
        self.tables[column as usize]
    }

    fn collect_range(
        &self,
        column: Column,
        prefix: Option<&[u8]>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, LmdbError> {
        let rtxn = self.env.read_txn()?;
        let table = self.table(column);
        let mut out = Vec::new();
        match prefix {
            None => {
                for entry in table.iter(&rtxn)? {
                    let (k, v) = entry?;
                    out.push((k.to_vec(), v.to_vec()));
                }
            }
            Some(prefix) => {
                let range: (Bound<&[u8]>, Bound<&[u8]>) = (Bound::Included(prefix), Bound::Unbounded);
                for entry in table.range(&rtxn, &range)? {
                    let (k, v) = entry?;
                    if !k.starts_with(prefix) {
                        break;
                    }
                    out.push((k.to_vec(), v.to_vec()));
                }
            }
        }
        Ok(out)
    }
}

impl KvStore for LmdbEnvironment {
    fn get(&self, column: Column, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let value = self
            .table(column)
            .get(&rtxn, key)
            .map_err(LmdbError::from)?
            .map(|v| v.to_vec());
        Ok(value)
    }

    fn put(&self, column: Column, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.table(column)
            .put(&mut wtxn, key, value)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn delete(&self, column: Column, key: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.table(column)
            .delete(&mut wtxn, key)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn scan(&self, column: Column) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        Ok(self.collect_range(column, None)?)
    }

    fn scan_prefix(
        &self,
        column: Column,
        prefix: &[u8],
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        Ok(self.collect_range(column, Some(prefix))?)
    }

    /// All operations share one write transaction. If any operation fails
    /// the transaction is dropped and LMDB aborts it.
    fn write_batch(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        for op in batch.into_ops() {
            match op {
                WriteOp::Put { column, key, value } => {
                    self.table(column)
                        .put(&mut wtxn, &key, &value)
                        .map_err(LmdbError::from)?;
                }
                WriteOp::Delete { column, key } => {
                    self.table(column)
                        .delete(&mut wtxn, &key)
                        .map_err(LmdbError::from)?;
                }
            }
        }
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
