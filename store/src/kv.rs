//! The key-value contract every backend implements.

use crate::{Column, StoreError, WriteBatch, WriteOp};

/// Byte-oriented key-value storage split into columns.
///
/// Methods take `&self`; backends provide their own interior mutability
/// (LMDB transactions, a mutex for the in-memory store).
pub trait KvStore {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, column: Column, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Insert or overwrite a value.
    fn put(&self, column: Column, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&self, column: Column, key: &[u8]) -> Result<(), StoreError>;

    /// All entries of a column in ascending key order.
    fn scan(&self, column: Column) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError>;

    /// Entries whose key starts with `prefix`, in ascending key order.
    fn scan_prefix(
        &self,
        column: Column,
        prefix: &[u8],
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        Ok(self
            .scan(column)?
            .into_iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect())
    }

    fn contains(&self, column: Column, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get(column, key)?.is_some())
    }

    /// Apply every operation of `batch`.
    ///
    /// Backends with transactions override this to apply the batch
    /// atomically; the default applies operations in order.
    fn write_batch(&self, batch: WriteBatch) -> Result<(), StoreError> {
        for op in batch.into_ops() {
            match op {
                WriteOp::Put { column, key, value } => self.put(column, &key, &value)?,
                WriteOp::Delete { column, key } => self.delete(column, &key)?,
            }
        }
        Ok(())
    }
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, column: Column, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(column, key)
    }

    fn put(&self, column: Column, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        (**self).put(column, key, value)
    }

    fn delete(&self, column: Column, key: &[u8]) -> Result<(), StoreError> {
        (**self).delete(column, key)
    }

    fn scan(&self, column: Column) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        (**self).scan(column)
    }

    fn scan_prefix(
        &self,
        column: Column,
        prefix: &[u8],
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        (**self).scan_prefix(column, prefix)
    }

    fn write_batch(&self, batch: WriteBatch) -> Result<(), StoreError> {
        (**self).write_batch(batch)
    }
}
