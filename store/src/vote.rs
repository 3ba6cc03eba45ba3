use crate::codec::{decode, encode};
use crate::keys::{identifier_from_voter_key, voter_key, voter_prefix};
use crate::{Column, KvStore, StoreError};
use tcr_types::{AccountAddress, Identifier, Vote};

/// Revealed votes and reward-claim markers, keyed by (voter, identifier).
///
/// A vote record is never rewritten once revealed; a claim is tracked by a
/// separate marker in [`Column::Claims`].
pub trait VoteStore: KvStore {
    fn get_vote(
        &self,
        voter: &AccountAddress,
        identifier: &Identifier,
    ) -> Result<Option<Vote>, StoreError> {
        self.get(Column::Votes, &voter_key(voter, identifier))?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    fn put_vote(
        &self,
        voter: &AccountAddress,
        identifier: &Identifier,
        vote: &Vote,
    ) -> Result<(), StoreError> {
        self.put(Column::Votes, &voter_key(voter, identifier), &encode(vote)?)
    }

    fn has_vote(&self, voter: &AccountAddress, identifier: &Identifier) -> Result<bool, StoreError> {
        self.contains(Column::Votes, &voter_key(voter, identifier))
    }

    /// Every identifier `voter` has revealed on, with the vote.
    fn votes_of(&self, voter: &AccountAddress) -> Result<Vec<(Identifier, Vote)>, StoreError> {
        self.scan_prefix(Column::Votes, &voter_prefix(voter))?
            .into_iter()
            .map(|(key, value)| {
                let identifier = identifier_from_voter_key(&key)
                    .ok_or_else(|| StoreError::Corruption("malformed vote key".into()))?;
                Ok((identifier, decode(&value)?))
            })
            .collect()
    }

    fn mark_claimed(&self, voter: &AccountAddress, identifier: &Identifier) -> Result<(), StoreError> {
        self.put(Column::Claims, &voter_key(voter, identifier), &[1])
    }

    fn is_claimed(&self, voter: &AccountAddress, identifier: &Identifier) -> Result<bool, StoreError> {
        self.contains(Column::Claims, &voter_key(voter, identifier))
    }
}

impl<T: KvStore + ?Sized> VoteStore for T {}
