use crate::keys::voter_key;
use crate::{Column, KvStore, StoreError};
use tcr_types::{AccountAddress, Identifier};

/// Sealed vote commitments, keyed by (voter, identifier). Values are the raw
/// commitment bytes.
pub trait CommitmentStore: KvStore {
    fn get_commitment(
        &self,
        voter: &AccountAddress,
        identifier: &Identifier,
    ) -> Result<Option<Vec<u8>>, StoreError> {
        self.get(Column::Commitments, &voter_key(voter, identifier))
    }

    fn put_commitment(
        &self,
        voter: &AccountAddress,
        identifier: &Identifier,
        commitment: &[u8],
    ) -> Result<(), StoreError> {
        self.put(Column::Commitments, &voter_key(voter, identifier), commitment)
    }

    fn delete_commitment(
        &self,
        voter: &AccountAddress,
        identifier: &Identifier,
    ) -> Result<(), StoreError> {
        self.delete(Column::Commitments, &voter_key(voter, identifier))
    }

    fn has_commitment(
        &self,
        voter: &AccountAddress,
        identifier: &Identifier,
    ) -> Result<bool, StoreError> {
        self.contains(Column::Commitments, &voter_key(voter, identifier))
    }
}

impl<T: KvStore + ?Sized> CommitmentStore for T {}
