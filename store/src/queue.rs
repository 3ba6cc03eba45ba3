use crate::codec::{decode, encode};
use crate::{Column, KvStore, StoreError};
use tcr_types::identifier::QUEUE_KEY;
use tcr_types::QueueItem;

/// The persisted application queue: one record holding every entry.
pub trait QueueStore: KvStore {
    /// Stored entries, or empty when no queue has been written yet.
    fn get_queue_items(&self) -> Result<Vec<QueueItem>, StoreError> {
        match self.get(Column::Ballots, QUEUE_KEY.as_bytes())? {
            Some(bytes) => decode(&bytes),
            None => Ok(Vec::new()),
        }
    }

    fn put_queue_items(&self, items: &[QueueItem]) -> Result<(), StoreError> {
        let items = items.to_vec();
        self.put(Column::Ballots, QUEUE_KEY.as_bytes(), &encode(&items)?)
    }
}

impl<T: KvStore + ?Sized> QueueStore for T {}
