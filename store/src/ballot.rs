use crate::codec::{decode, encode};
use crate::{Column, KvStore, StoreError};
use tcr_types::identifier::QUEUE_KEY;
use tcr_types::{Ballot, Identifier};

/// Ballot records, keyed by identifier.
pub trait BallotStore: KvStore {
    fn get_ballot(&self, identifier: &Identifier) -> Result<Option<Ballot>, StoreError> {
        self.get(Column::Ballots, identifier.as_bytes())?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    fn put_ballot(&self, ballot: &Ballot) -> Result<(), StoreError> {
        self.put(Column::Ballots, ballot.identifier.as_bytes(), &encode(ballot)?)
    }

    fn delete_ballot(&self, identifier: &Identifier) -> Result<(), StoreError> {
        self.delete(Column::Ballots, identifier.as_bytes())
    }

    fn ballot_exists(&self, identifier: &Identifier) -> Result<bool, StoreError> {
        self.contains(Column::Ballots, identifier.as_bytes())
    }

    /// Every ballot in identifier order. The persisted queue shares this
    /// column and is skipped.
    fn iter_ballots(&self) -> Result<Vec<Ballot>, StoreError> {
        self.scan(Column::Ballots)?
            .into_iter()
            .filter(|(key, _)| key.as_slice() != QUEUE_KEY.as_bytes())
            .map(|(_, value)| decode(&value))
            .collect()
    }
}

impl<T: KvStore + ?Sized> BallotStore for T {}
