//! Read-through write cache over another store.
//!
//! A `CacheStore` is opened per transaction. Reads see the transaction's own
//! writes layered over the backend; nothing reaches the backend until
//! [`CacheStore::commit`]. Dropping the cache discards every buffered write,
//! which is how a failed transaction leaves no trace.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::{Column, KvStore, StoreError, WriteBatch};

type PendingKey = (Column, Vec<u8>);

pub struct CacheStore<'a, B: KvStore + ?Sized> {
    base: &'a B,
    /// `Some(value)` for a buffered put, `None` for a buffered delete.
    pending: RefCell<BTreeMap<PendingKey, Option<Vec<u8>>>>,
}

impl<'a, B: KvStore + ?Sized> CacheStore<'a, B> {
    pub fn new(base: &'a B) -> Self {
        Self {
            base,
            pending: RefCell::new(BTreeMap::new()),
        }
    }

    /// Number of keys with buffered changes.
    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_clean(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Drain the buffered changes into a batch without writing it.
    pub fn into_batch(self) -> WriteBatch {
        let mut batch = WriteBatch::new();
        for ((column, key), value) in self.pending.into_inner() {
            match value {
                Some(value) => batch.put(column, key, value),
                None => batch.delete(column, key),
            }
        }
        batch
    }

    /// Flush every buffered change to the backend in one batch.
    pub fn commit(self) -> Result<(), StoreError> {
        let base = self.base;
        let batch = self.into_batch();
        if batch.is_empty() {
            return Ok(());
        }
        tracing::trace!(ops = batch.len(), "committing write batch");
        base.write_batch(batch)
    }
}

impl<B: KvStore + ?Sized> KvStore for CacheStore<'_, B> {
    fn get(&self, column: Column, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(buffered) = self.pending.borrow().get(&(column, key.to_vec())) {
            return Ok(buffered.clone());
        }
        self.base.get(column, key)
    }

    fn put(&self, column: Column, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.pending
            .borrow_mut()
            .insert((column, key.to_vec()), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&self, column: Column, key: &[u8]) -> Result<(), StoreError> {
        self.pending.borrow_mut().insert((column, key.to_vec()), None);
        Ok(())
    }

    fn scan(&self, column: Column) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = self.base.scan(column)?.into_iter().collect();
        for ((col, key), value) in self.pending.borrow().iter() {
            if *col != column {
                continue;
            }
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        Ok(merged.into_iter().collect())
    }
}
