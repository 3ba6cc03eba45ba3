//! The registry application: genesis, block execution and queries.
//!
//! Transactions are delivered one at a time at the height of the current
//! block. Each runs against its own [`CacheStore`]; the cache is committed
//! only when the engine accepts the transaction, so a rejected transaction
//! changes neither the registry nor any balance.

use std::path::Path;

use tcr_ballot::{BallotEngine, BallotError};
use tcr_ledger::{GenesisState, Ledger, StoreLedger};
use tcr_store::{BallotStore, CacheStore, KvStore, ListingStore, MetaStore};
use tcr_store_lmdb::{check_data_dir, check_integrity, LmdbEnvironment};
use tcr_transactions::Transaction;
use tcr_types::{
    AccountAddress, Ballot, BallotPhase, BlockHeight, Identifier, Listing, QueueItem,
    RegistryParams,
};

use crate::{Block, NodeError, TxEffect, TxReceipt};

pub struct RegistryApp<S> {
    store: S,
    engine: BallotEngine,
    /// Height of the block being executed, set by [`RegistryApp::begin_block`].
    height: Option<BlockHeight>,
}

impl<S: KvStore> RegistryApp<S> {
    pub fn new(store: S, params: RegistryParams) -> Result<Self, NodeError> {
        params.validate()?;
        Ok(Self {
            store,
            engine: BallotEngine::new(params),
            height: None,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn params(&self) -> &RegistryParams {
        self.engine.params()
    }

    /// Credit the genesis balances. Allowed once per store.
    pub fn init_genesis(&self, genesis: &GenesisState) -> Result<(), NodeError> {
        let cache = CacheStore::new(&self.store);
        if cache.genesis_applied()? {
            return Err(NodeError::GenesisAlreadyApplied);
        }
        genesis.apply(&StoreLedger::new(&cache))?;
        cache.mark_genesis_applied()?;
        cache.commit()?;
        tracing::info!(
            accounts = genesis.accounts.len(),
            supply = genesis.total_supply()?,
            "genesis applied"
        );
        Ok(())
    }

    /// Start executing the block at `height`. Heights never decrease; several
    /// blocks may share a height.
    pub fn begin_block(&mut self, height: BlockHeight) -> Result<(), NodeError> {
        if let Some(last) = self.store.last_height()? {
            if height < last {
                return Err(NodeError::HeightRegression {
                    last,
                    requested: height,
                });
            }
        }
        self.store.put_last_height(height)?;
        self.height = Some(height);
        tracing::debug!(height = %height, "block started");
        Ok(())
    }

    /// Execute one transaction at the current height.
    ///
    /// A rejected transaction yields a receipt carrying the reason. Storage
    /// failures abort with `Err`; the caller must not continue the block.
    pub fn deliver(&self, tx: &Transaction) -> Result<TxReceipt, NodeError> {
        let height = self.height.ok_or(NodeError::NoBlockStarted)?;

        if let Err(e) = tx.validate_basic() {
            tracing::warn!(kind = tx.kind(), identifier = %tx.identifier(), error = %e, "malformed transaction");
            return Ok(TxReceipt::rejected(height, tx, e.to_string()));
        }

        let cache = CacheStore::new(&self.store);
        let result = {
            let ledger = StoreLedger::new(&cache);
            self.execute(&cache, &ledger, height, tx)
        };
        match result {
            Ok(effect) => {
                cache.commit()?;
                Ok(TxReceipt::accepted(height, tx, effect))
            }
            Err(BallotError::Store(e)) => {
                tracing::error!(kind = tx.kind(), identifier = %tx.identifier(), error = %e, "transaction aborted by storage failure");
                Err(e.into())
            }
            Err(e) => {
                tracing::warn!(kind = tx.kind(), identifier = %tx.identifier(), error = %e, "transaction rejected");
                Ok(TxReceipt::rejected(height, tx, e.to_string()))
            }
        }
    }

    /// Begin `block` and deliver its transactions in order.
    pub fn execute_block(&mut self, block: &Block) -> Result<Vec<TxReceipt>, NodeError> {
        self.begin_block(block.height)?;
        let receipts = block
            .txs
            .iter()
            .map(|tx| self.deliver(tx))
            .collect::<Result<Vec<_>, _>>()?;

        let accepted = receipts.iter().filter(|r| r.is_success()).count();
        let due = self.engine.queue(&self.store)?.due(block.height).len();
        tracing::info!(
            height = %block.height,
            txs = receipts.len(),
            accepted,
            due,
            "block executed"
        );
        Ok(receipts)
    }

    fn execute<K, L>(
        &self,
        store: &K,
        ledger: &L,
        height: BlockHeight,
        tx: &Transaction,
    ) -> Result<TxEffect, BallotError>
    where
        K: KvStore + ?Sized,
        L: Ledger + ?Sized,
    {
        let engine = &self.engine;
        match tx {
            Transaction::DeclareCandidacy(tx) => {
                engine.declare_candidacy(
                    store,
                    ledger,
                    height,
                    &tx.owner,
                    &tx.identifier,
                    tx.deposit,
                    &tx.details,
                )?;
                Ok(TxEffect::Declared)
            }
            Transaction::Challenge(tx) => engine
                .challenge(store, ledger, height, &tx.challenger, &tx.identifier, tx.bond)
                .map(TxEffect::Challenged),
            Transaction::Commit(tx) => {
                engine.commit(store, height, &tx.voter, &tx.identifier, &tx.commitment)?;
                Ok(TxEffect::Committed)
            }
            Transaction::Reveal(tx) => {
                engine.reveal(
                    store,
                    ledger,
                    height,
                    &tx.voter,
                    &tx.identifier,
                    tx.vote,
                    &tx.nonce,
                    tx.bond,
                )?;
                Ok(TxEffect::Revealed)
            }
            Transaction::Apply(tx) => engine
                .apply(store, ledger, height, &tx.identifier)
                .map(TxEffect::Applied),
            Transaction::ClaimReward(tx) => engine
                .claim_reward(store, ledger, &tx.voter, &tx.identifier)
                .map(|amount| TxEffect::Claimed { amount }),
        }
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn last_height(&self) -> Result<Option<BlockHeight>, NodeError> {
        Ok(self.store.last_height()?)
    }

    pub fn ballot(&self, identifier: &Identifier) -> Result<Option<Ballot>, NodeError> {
        Ok(self.store.get_ballot(identifier)?)
    }

    pub fn ballots(&self) -> Result<Vec<Ballot>, NodeError> {
        Ok(self.store.iter_ballots()?)
    }

    pub fn listing(&self, identifier: &Identifier) -> Result<Option<Listing>, NodeError> {
        Ok(self.store.get_listing(identifier)?)
    }

    pub fn listings(&self) -> Result<Vec<Listing>, NodeError> {
        Ok(self.store.iter_listings()?)
    }

    pub fn balance(&self, account: &AccountAddress) -> Result<u128, NodeError> {
        Ok(StoreLedger::new(&self.store).balance(account)?)
    }

    /// Queue entries in the order they expire.
    pub fn queue_snapshot(&self) -> Result<Vec<QueueItem>, NodeError> {
        Ok(self.engine.queue(&self.store)?.sorted())
    }

    /// Phase of a candidate at the current height, or at the last persisted
    /// height when no block is in progress.
    pub fn phase_of(&self, identifier: &Identifier) -> Result<Option<BallotPhase>, NodeError> {
        let height = match self.height {
            Some(height) => height,
            None => self.store.last_height()?.unwrap_or_default(),
        };
        Ok(self.engine.phase_of(&self.store, identifier, height)?)
    }

    /// Snapshot the balances in genesis form.
    pub fn export_genesis(&self) -> Result<GenesisState, NodeError> {
        Ok(GenesisState::export(&self.store)?)
    }
}

/// Open (or create) the LMDB environment at `path`, verify it and wrap it in
/// an app.
pub fn open_lmdb_app(
    path: &Path,
    map_size: usize,
    params: RegistryParams,
) -> Result<RegistryApp<LmdbEnvironment>, NodeError> {
    check_data_dir(path).map_err(NodeError::Integrity)?;
    let env = LmdbEnvironment::open(path, map_size)?;
    let report = check_integrity(&env)?;
    if !report.is_healthy() {
        return Err(NodeError::Integrity(report.errors.join("; ")));
    }
    tracing::info!(
        path = %path.display(),
        databases = report.databases_checked,
        entries = report.total_entries,
        "LMDB environment opened"
    );
    RegistryApp::new(env, params)
}
