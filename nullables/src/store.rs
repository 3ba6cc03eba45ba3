//! Nullable store: thread-safe in-memory key-value storage for testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use tcr_store::{Column, KvStore, StoreError, WriteBatch, WriteOp};

type Data = BTreeMap<(Column, Vec<u8>), Vec<u8>>;

/// An in-memory `KvStore`.
///
/// Writes can be switched to fail, to exercise the error paths of callers.
#[derive(Default)]
pub struct NullStore {
    data: Mutex<Data>,
    fail_writes: AtomicBool,
    batches: AtomicUsize,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write return a backend error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of batches committed so far.
    pub fn batch_count(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }

    /// Total number of stored entries across all columns.
    pub fn len(&self) -> usize {
        self.lock().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Data>, StoreError> {
        self.data
            .lock()
            .map_err(|_| StoreError::Backend("null store lock poisoned".into()))
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("writes disabled".into()));
        }
        Ok(())
    }
}

impl KvStore for NullStore {
    fn get(&self, column: Column, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock()?.get(&(column, key.to_vec())).cloned())
    }

    fn put(&self, column: Column, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.check_writable()?;
        self.lock()?.insert((column, key.to_vec()), value.to_vec());
        Ok(())
    }

    fn delete(&self, column: Column, key: &[u8]) -> Result<(), StoreError> {
        self.check_writable()?;
        self.lock()?.remove(&(column, key.to_vec()));
        Ok(())
    }

    fn scan(&self, column: Column) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|((c, _), _)| *c == column)
            .map(|((_, k), v)| (k.clone(), v.clone()))
            .collect())
    }

    /// Applied under one lock acquisition; all or nothing.
    fn write_batch(&self, batch: WriteBatch) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut data = self.lock()?;
        for op in batch.into_ops() {
            match op {
                WriteOp::Put { column, key, value } => {
                    data.insert((column, key), value);
                }
                WriteOp::Delete { column, key } => {
                    data.remove(&(column, key));
                }
            }
        }
        self.batches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_operations() {
        let store = NullStore::new();
        store.put(Column::Ballots, b"a", b"1").unwrap();
        assert_eq!(store.get(Column::Ballots, b"a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.get(Column::Listings, b"a").unwrap(), None);
        store.delete(Column::Ballots, b"a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn failing_writes_leave_data_unchanged() {
        let store = NullStore::new();
        store.put(Column::Meta, b"k", b"v").unwrap();
        store.set_fail_writes(true);

        let mut batch = WriteBatch::new();
        batch.delete(Column::Meta, b"k".to_vec());
        assert!(store.write_batch(batch).is_err());
        assert!(store.put(Column::Meta, b"x", b"y").is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.batch_count(), 0);
    }

    #[test]
    fn scan_is_sorted_per_column() {
        let store = NullStore::new();
        store.put(Column::Votes, b"b", b"2").unwrap();
        store.put(Column::Votes, b"a", b"1").unwrap();
        store.put(Column::Claims, b"c", b"3").unwrap();
        let keys: Vec<_> = store
            .scan(Column::Votes)
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"a".to_vec(), b"b".to_vec()]);
    }
}
