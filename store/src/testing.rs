//! In-crate test backend. Other crates use `tcr-nullables`.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::{Column, KvStore, StoreError};

#[derive(Default)]
pub(crate) struct MemStore {
    data: Mutex<BTreeMap<(Column, Vec<u8>), Vec<u8>>>,
}

impl KvStore for MemStore {
    fn get(&self, column: Column, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.lock().unwrap().get(&(column, key.to_vec())).cloned())
    }

    fn put(&self, column: Column, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.data
            .lock()
            .unwrap()
            .insert((column, key.to_vec()), value.to_vec());
        Ok(())
    }

    fn delete(&self, column: Column, key: &[u8]) -> Result<(), StoreError> {
        self.data.lock().unwrap().remove(&(column, key.to_vec()));
        Ok(())
    }

    fn scan(&self, column: Column) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StoreError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .iter()
            .filter(|((c, _), _)| *c == column)
            .map(|((_, k), v)| (k.clone(), v.clone()))
            .collect())
    }
}
