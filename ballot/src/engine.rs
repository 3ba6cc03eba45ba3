//! The ballot lifecycle engine.
//!
//! Every operation validates first and only then debits, writes and credits.
//! Callers run each operation against a fresh `CacheStore` and discard it on
//! error, so a failed operation leaves neither registry nor balances changed.

use serde::{Deserialize, Serialize};
use tcr_crypto::verify_vote;
use tcr_ledger::Ledger;
use tcr_store::{
    BallotStore, CommitmentStore, KvStore, ListingStore, QueueStore, VoteStore,
};
use tcr_types::{
    AccountAddress, Ballot, BallotPhase, BlockHeight, ChallengeInfo, Identifier, Listing,
    QueueItem, RegistryParams, Vote,
};

use crate::settlement::{
    challenger_reward, owner_reward, quorum_reached, voter_pool, voter_reward,
};
use crate::{ApplicationQueue, BallotError};

/// Result of a successful challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ChallengeOutcome {
    /// Voting opened.
    Activated {
        end_commit_height: BlockHeight,
        end_reveal_height: BlockHeight,
    },
    /// The candidate's bond was below the current minimum deposit: it was
    /// purged and the challenger kept their bond.
    Removed,
}

/// Result of a successful apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApplyOutcome {
    /// Unchallenged candidate listed once its apply window closed.
    Listed,
    /// Challenged candidate survived the vote.
    OwnerWon { votes: u128, owner_reward: u128 },
    /// Challenged candidate was rejected and delisted.
    ChallengerWon { challenger_reward: u128 },
}

/// Applies registry transitions under a fixed parameter set.
#[derive(Clone, Debug)]
pub struct BallotEngine {
    params: RegistryParams,
}

impl BallotEngine {
    pub fn new(params: RegistryParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RegistryParams {
        &self.params
    }

    /// Open a candidacy: lock `deposit` from `owner` and queue the candidate
    /// until its apply window closes.
    #[allow(clippy::too_many_arguments)]
    pub fn declare_candidacy<S, L>(
        &self,
        store: &S,
        ledger: &L,
        height: BlockHeight,
        owner: &AccountAddress,
        identifier: &Identifier,
        deposit: u128,
        details: &str,
    ) -> Result<(), BallotError>
    where
        S: KvStore + ?Sized,
        L: Ledger + ?Sized,
    {
        if !identifier.is_valid() {
            return Err(BallotError::InvalidIdentifier(identifier.as_str().to_string()));
        }
        if deposit < self.params.min_deposit {
            return Err(BallotError::InsufficientDeposit {
                deposit,
                min_deposit: self.params.min_deposit,
            });
        }
        ensure_funds(ledger, owner, deposit)?;
        if store.ballot_exists(identifier)? {
            return Err(BallotError::DuplicateCandidate(identifier.clone()));
        }
        let end_apply = height
            .checked_add(self.params.apply_stage_len)
            .ok_or(BallotError::Overflow("end of apply stage"))?;

        ledger.debit(owner, deposit)?;
        let ballot = Ballot::new(identifier.clone(), owner.clone(), deposit, end_apply)
            .with_details(details);
        store.put_ballot(&ballot)?;

        let mut queue = load_queue(store)?;
        queue.push(QueueItem::new(identifier.clone(), end_apply));
        save_queue(store, queue)?;

        tracing::info!(
            identifier = %identifier,
            owner = %owner,
            deposit,
            end_apply = %end_apply,
            "candidacy declared"
        );
        Ok(())
    }

    /// Challenge a candidate by matching its bond, opening commit-reveal
    /// voting. A candidate whose bond no longer meets the minimum deposit is
    /// removed instead and the challenger keeps their funds.
    pub fn challenge<S, L>(
        &self,
        store: &S,
        ledger: &L,
        height: BlockHeight,
        challenger: &AccountAddress,
        identifier: &Identifier,
        bond: u128,
    ) -> Result<ChallengeOutcome, BallotError>
    where
        S: KvStore + ?Sized,
        L: Ledger + ?Sized,
    {
        ensure_funds(ledger, challenger, bond)?;
        let mut ballot = store
            .get_ballot(identifier)?
            .ok_or_else(|| BallotError::UnknownCandidate(identifier.clone()))?;
        if ballot.is_challenged() {
            return Err(BallotError::AlreadyChallenged(identifier.clone()));
        }

        if ballot.bond < self.params.min_deposit {
            // Debit and full refund cancel out; only the ballot goes.
            store.delete_ballot(identifier)?;
            let mut queue = load_queue(store)?;
            queue.remove(identifier);
            save_queue(store, queue)?;
            tracing::info!(
                identifier = %identifier,
                bond = ballot.bond,
                min_deposit = self.params.min_deposit,
                "under-bonded candidate removed"
            );
            return Ok(ChallengeOutcome::Removed);
        }

        if bond != ballot.bond {
            return Err(BallotError::BondMismatch {
                expected: ballot.bond,
                actual: bond,
            });
        }

        let end_commit_height = height
            .checked_add(self.params.commit_stage_len)
            .ok_or(BallotError::Overflow("end of commit stage"))?;
        let end_reveal_height = end_commit_height
            .checked_add(self.params.reveal_stage_len)
            .ok_or(BallotError::Overflow("end of reveal stage"))?;

        // A pending candidate is queued until its apply window closes; a
        // listed one left the queue when it was applied.
        let mut queue = load_queue(store)?;
        if ballot.is_settled() {
            queue.push(QueueItem::new(identifier.clone(), end_reveal_height));
        } else {
            queue.update(identifier, end_reveal_height)?;
        }

        ledger.debit(challenger, bond)?;
        ballot.active = true;
        ballot.settled_at = None;
        ballot.challenge = Some(ChallengeInfo {
            challenger: challenger.clone(),
            end_commit_height,
            end_reveal_height,
        });
        store.put_ballot(&ballot)?;
        save_queue(store, queue)?;

        tracing::info!(
            identifier = %identifier,
            challenger = %challenger,
            bond,
            end_commit = %end_commit_height,
            end_reveal = %end_reveal_height,
            "candidate challenged"
        );
        Ok(ChallengeOutcome::Activated {
            end_commit_height,
            end_reveal_height,
        })
    }

    /// Record (or replace) a voter's sealed vote during the commit stage.
    pub fn commit<S>(
        &self,
        store: &S,
        height: BlockHeight,
        voter: &AccountAddress,
        identifier: &Identifier,
        commitment: &[u8],
    ) -> Result<(), BallotError>
    where
        S: KvStore + ?Sized,
    {
        let ballot = store
            .get_ballot(identifier)?
            .ok_or_else(|| BallotError::UnknownCandidate(identifier.clone()))?;
        if !ballot.in_commit_phase(height) {
            return Err(BallotError::NotInCommitPhase(identifier.clone()));
        }
        store.put_commitment(voter, identifier, commitment)?;
        tracing::debug!(identifier = %identifier, voter = %voter, "vote committed");
        Ok(())
    }

    /// Open a sealed vote, staking `bond` as its weight.
    #[allow(clippy::too_many_arguments)]
    pub fn reveal<S, L>(
        &self,
        store: &S,
        ledger: &L,
        height: BlockHeight,
        voter: &AccountAddress,
        identifier: &Identifier,
        vote: bool,
        nonce: &[u8],
        bond: u128,
    ) -> Result<(), BallotError>
    where
        S: KvStore + ?Sized,
        L: Ledger + ?Sized,
    {
        ensure_funds(ledger, voter, bond)?;
        let mut ballot = store
            .get_ballot(identifier)?
            .ok_or_else(|| BallotError::UnknownCandidate(identifier.clone()))?;
        if !ballot.in_reveal_phase(height) {
            return Err(BallotError::NotInRevealPhase(identifier.clone()));
        }
        if store.has_vote(voter, identifier)? {
            return Err(BallotError::AlreadyVoted(identifier.clone()));
        }
        let matches = store
            .get_commitment(voter, identifier)?
            .is_some_and(|commitment| verify_vote(&commitment, vote, nonce));
        if !matches {
            return Err(BallotError::CommitmentMismatch(identifier.clone()));
        }

        let tally = if vote { &mut ballot.approve } else { &mut ballot.deny };
        *tally = tally
            .checked_add(bond)
            .ok_or(BallotError::Overflow("vote tally"))?;

        ledger.debit(voter, bond)?;
        store.put_vote(voter, identifier, &Vote::new(vote, bond))?;
        store.put_ballot(&ballot)?;
        store.delete_commitment(voter, identifier)?;

        tracing::debug!(
            identifier = %identifier,
            voter = %voter,
            vote,
            power = bond,
            "vote revealed"
        );
        Ok(())
    }

    /// Settle a candidate whose current window has closed. Callable by
    /// anyone.
    pub fn apply<S, L>(
        &self,
        store: &S,
        ledger: &L,
        height: BlockHeight,
        identifier: &Identifier,
    ) -> Result<ApplyOutcome, BallotError>
    where
        S: KvStore + ?Sized,
        L: Ledger + ?Sized,
    {
        let mut ballot = store
            .get_ballot(identifier)?
            .ok_or_else(|| BallotError::UnknownCandidate(identifier.clone()))?;
        if ballot.is_settled() {
            return Err(BallotError::AlreadySettled(identifier.clone()));
        }
        let mut queue = load_queue(store)?;
        if queue.remove(identifier).is_none() {
            return Err(BallotError::QueueEntryNotFound(identifier.clone()));
        }

        let outcome = match ballot.challenge.clone() {
            Some(challenge) if ballot.active => {
                if height < challenge.end_reveal_height {
                    return Err(BallotError::RevealWindowNotClosed {
                        ends_at: challenge.end_reveal_height,
                    });
                }
                if quorum_reached(ballot.approve, ballot.deny, self.params.quorum_bps)? {
                    let reward = owner_reward(ballot.bond, self.params.dispensation_bps)?;
                    store.put_listing(&Listing::new(identifier.clone(), ballot.approve))?;
                    ledger.credit(&ballot.owner, reward)?;
                    ApplyOutcome::OwnerWon {
                        votes: ballot.approve,
                        owner_reward: reward,
                    }
                } else {
                    let reward = challenger_reward(ballot.bond, self.params.dispensation_bps)?;
                    store.delete_listing(identifier)?;
                    ledger.credit(&challenge.challenger, reward)?;
                    ApplyOutcome::ChallengerWon {
                        challenger_reward: reward,
                    }
                }
            }
            _ => {
                if height < ballot.end_apply_height {
                    return Err(BallotError::ApplyWindowNotClosed {
                        ends_at: ballot.end_apply_height,
                    });
                }
                store.put_listing(&Listing::new(identifier.clone(), 0))?;
                ApplyOutcome::Listed
            }
        };

        ballot.active = false;
        ballot.settled_at = Some(height);
        store.put_ballot(&ballot)?;
        save_queue(store, queue)?;

        tracing::info!(identifier = %identifier, outcome = ?outcome, "candidate settled");
        Ok(outcome)
    }

    /// Pay out a voter's stake, plus their share of the pool when they voted
    /// with the outcome. Returns the amount credited.
    pub fn claim_reward<S, L>(
        &self,
        store: &S,
        ledger: &L,
        voter: &AccountAddress,
        identifier: &Identifier,
    ) -> Result<u128, BallotError>
    where
        S: KvStore + ?Sized,
        L: Ledger + ?Sized,
    {
        let ballot = match store.get_ballot(identifier)? {
            Some(ballot) if !ballot.active => ballot,
            _ => return Err(BallotError::NotYetFinalized(identifier.clone())),
        };
        let vote = store
            .get_vote(voter, identifier)?
            .ok_or_else(|| BallotError::NoVoteRecorded(identifier.clone()))?;
        if store.is_claimed(voter, identifier)? {
            return Err(BallotError::RewardAlreadyClaimed(identifier.clone()));
        }

        let accepted = store.listing_exists(identifier)?;
        let amount = if vote.choice != accepted {
            vote.power
        } else {
            let pool = voter_pool(ballot.bond, self.params.dispensation_bps)?;
            let winning_total = if accepted { ballot.approve } else { ballot.deny };
            voter_reward(vote.power, pool, winning_total)?
        };

        ledger.credit(voter, amount)?;
        store.mark_claimed(voter, identifier)?;
        tracing::debug!(
            identifier = %identifier,
            voter = %voter,
            amount,
            winner = vote.choice == accepted,
            "reward claimed"
        );
        Ok(amount)
    }

    /// Phase of a candidate at `height`, or `None` if it does not exist.
    pub fn phase_of<S>(
        &self,
        store: &S,
        identifier: &Identifier,
        height: BlockHeight,
    ) -> Result<Option<BallotPhase>, BallotError>
    where
        S: KvStore + ?Sized,
    {
        Ok(store.get_ballot(identifier)?.map(|b| b.phase(height)))
    }

    /// The persisted application queue.
    pub fn queue<S>(&self, store: &S) -> Result<ApplicationQueue, BallotError>
    where
        S: KvStore + ?Sized,
    {
        load_queue(store)
    }
}

fn ensure_funds<L: Ledger + ?Sized>(
    ledger: &L,
    account: &AccountAddress,
    amount: u128,
) -> Result<(), BallotError> {
    let available = ledger.balance(account)?;
    if available < amount {
        return Err(BallotError::InsufficientFunds {
            needed: amount,
            available,
        });
    }
    Ok(())
}

fn load_queue<S: KvStore + ?Sized>(store: &S) -> Result<ApplicationQueue, BallotError> {
    Ok(ApplicationQueue::from_items(store.get_queue_items()?))
}

fn save_queue<S: KvStore + ?Sized>(store: &S, queue: ApplicationQueue) -> Result<(), BallotError> {
    store.put_queue_items(&queue.into_items())?;
    Ok(())
}
