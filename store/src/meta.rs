use crate::{Column, KvStore, StoreError};
use tcr_types::BlockHeight;

const LAST_HEIGHT_KEY: &[u8] = b"last_height";
const GENESIS_KEY: &[u8] = b"genesis";

/// Chain bookkeeping: last processed height and the genesis marker.
pub trait MetaStore: KvStore {
    fn last_height(&self) -> Result<Option<BlockHeight>, StoreError> {
        let Some(bytes) = self.get(Column::Meta, LAST_HEIGHT_KEY)? else {
            return Ok(None);
        };
        let arr: [u8; 8] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| StoreError::Corruption("last height is not 8 bytes".into()))?;
        Ok(Some(BlockHeight::new(u64::from_be_bytes(arr))))
    }

    fn put_last_height(&self, height: BlockHeight) -> Result<(), StoreError> {
        self.put(Column::Meta, LAST_HEIGHT_KEY, &height.get().to_be_bytes())
    }

    fn genesis_applied(&self) -> Result<bool, StoreError> {
        self.contains(Column::Meta, GENESIS_KEY)
    }

    fn mark_genesis_applied(&self) -> Result<(), StoreError> {
        self.put(Column::Meta, GENESIS_KEY, &[1])
    }
}

impl<T: KvStore + ?Sized> MetaStore for T {}
