//! Integration tests exercising the full node pipeline:
//! genesis → blocks of transactions → engine → cache commit → readback.
//!
//! Runs against both the in-memory store and a real LMDB environment,
//! including reopening the environment to confirm state survives.

use tcr_ballot::{ApplyOutcome, ChallengeOutcome};
use tcr_ledger::{GenesisAccount, GenesisState};
use tcr_node::{open_lmdb_app, Block, NodeError, RegistryApp, TxEffect};
use tcr_nullables::{NullNonces, NullStore};
use tcr_transactions::{
    ApplyTx, ChallengeTx, ClaimRewardTx, CommitTx, DeclareCandidacyTx, RevealTx, Transaction,
};
use tcr_types::{AccountAddress, BallotPhase, BlockHeight, Identifier, RegistryParams};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const MAP_SIZE: usize = 64 * 1024 * 1024;

fn addr(name: &str) -> AccountAddress {
    AccountAddress::new(format!("tcr_{name}"))
}

fn genesis(names: &[&str], balance: u128) -> GenesisState {
    GenesisState {
        accounts: names
            .iter()
            .map(|name| GenesisAccount {
                address: addr(name),
                balance,
            })
            .collect(),
    }
}

fn null_app() -> RegistryApp<NullStore> {
    RegistryApp::new(NullStore::new(), RegistryParams::registry_defaults()).expect("app")
}

fn block(height: u64, txs: Vec<Transaction>) -> Block {
    Block::new(BlockHeight::new(height), txs)
}

/// The blocks of a challenge the owner wins 300 to 100.
fn contested_blocks(id: &Identifier, nonces: &NullNonces) -> Vec<Block> {
    let votes = [("v1", true, 150u128), ("v2", true, 150), ("v3", false, 60), ("v4", false, 40)];
    let secrets: Vec<_> = votes.iter().map(|_| nonces.next()).collect();

    let commits: Vec<Transaction> = votes
        .iter()
        .zip(&secrets)
        .map(|((name, choice, _), nonce)| {
            CommitTx::sealed(addr(name), id.clone(), *choice, nonce).into()
        })
        .collect();
    let reveals: Vec<Transaction> = votes
        .iter()
        .zip(&secrets)
        .map(|((name, choice, power), nonce)| {
            RevealTx::new(addr(name), id.clone(), *choice, nonce.to_vec(), *power).into()
        })
        .collect();
    let claims: Vec<Transaction> = votes
        .iter()
        .map(|(name, _, _)| ClaimRewardTx::new(addr(name), id.clone()).into())
        .collect();

    vec![
        block(0, vec![DeclareCandidacyTx::new(addr("owner"), id.clone(), 200).into()]),
        block(5, vec![ChallengeTx::new(addr("challenger"), id.clone(), 200).into()]),
        block(10, commits),
        block(25, reveals),
        block(25, vec![ApplyTx::new(id.clone()).into()]),
        block(26, claims),
    ]
}

const PARTICIPANTS: [&str; 6] = ["owner", "challenger", "v1", "v2", "v3", "v4"];

// ---------------------------------------------------------------------------
// In-memory pipeline
// ---------------------------------------------------------------------------

#[test]
fn contested_candidate_settles_through_blocks() {
    let mut app = null_app();
    app.init_genesis(&genesis(&PARTICIPANTS, 1_000)).unwrap();
    let id = Identifier::new("coffee");
    let nonces = NullNonces::sequential(4);

    let mut receipts = Vec::new();
    for b in contested_blocks(&id, &nonces) {
        receipts.extend(app.execute_block(&b).unwrap());
    }
    assert!(receipts.iter().all(|r| r.is_success()), "{receipts:?}");

    assert_eq!(
        receipts[1].effect,
        Some(TxEffect::Challenged(ChallengeOutcome::Activated {
            end_commit_height: BlockHeight::new(15),
            end_reveal_height: BlockHeight::new(25),
        }))
    );
    assert_eq!(
        receipts[10].effect,
        Some(TxEffect::Applied(ApplyOutcome::OwnerWon {
            votes: 300,
            owner_reward: 100,
        }))
    );
    assert_eq!(receipts[11].effect, Some(TxEffect::Claimed { amount: 200 }));

    assert_eq!(app.listing(&id).unwrap().map(|l| l.votes), Some(300));
    assert_eq!(app.balance(&addr("v1")).unwrap(), 1_050);
    assert_eq!(app.balance(&addr("v4")).unwrap(), 1_000);
    assert_eq!(app.balance(&addr("challenger")).unwrap(), 800);
    assert_eq!(app.phase_of(&id).unwrap(), Some(BallotPhase::Settled));
    assert!(app.queue_snapshot().unwrap().is_empty());
}

#[test]
fn rejected_transactions_do_not_stop_the_block() {
    let mut app = null_app();
    app.init_genesis(&genesis(&["owner", "challenger"], 500)).unwrap();
    let id = Identifier::new("coffee");

    let receipts = app
        .execute_block(&block(
            0,
            vec![
                DeclareCandidacyTx::new(addr("owner"), id.clone(), 100).into(),
                DeclareCandidacyTx::new(addr("owner"), id.clone(), 100).into(),
                ChallengeTx::new(addr("challenger"), id.clone(), 99).into(),
                ChallengeTx::new(addr("challenger"), id.clone(), 100).into(),
            ],
        ))
        .unwrap();

    let accepted: Vec<bool> = receipts.iter().map(|r| r.is_success()).collect();
    assert_eq!(accepted, vec![true, false, false, true]);
    assert!(receipts[1].error.as_deref().unwrap_or_default().contains("already exists"));
    assert_eq!(app.balance(&addr("owner")).unwrap(), 400);
    assert_eq!(app.balance(&addr("challenger")).unwrap(), 400);
}

#[test]
fn blocks_parse_from_json_and_execute() {
    let raw = r#"[
        {"height": 0, "txs": [
            {"type": "declare_candidacy", "owner": "tcr_owner", "identifier": "cafe", "deposit": 100, "details": "espresso"}
        ]},
        {"height": 9, "txs": [{"type": "apply", "identifier": "cafe"}]},
        {"height": 10, "txs": [{"type": "apply", "identifier": "cafe"}]}
    ]"#;
    let mut app = null_app();
    app.init_genesis(&genesis(&["owner"], 100)).unwrap();

    let results: Vec<bool> = Block::list_from_json(raw)
        .unwrap()
        .iter()
        .flat_map(|b| app.execute_block(b).unwrap())
        .map(|r| r.is_success())
        .collect();

    assert_eq!(results, vec![true, false, true]);
    assert_eq!(app.listings().unwrap().len(), 1);
    assert_eq!(app.ballot(&Identifier::new("cafe")).unwrap().unwrap().details, "espresso");
}

#[test]
fn height_regression_is_refused() {
    let mut app = null_app();
    app.execute_block(&block(7, vec![])).unwrap();
    let err = app.execute_block(&block(6, vec![])).unwrap_err();
    assert!(matches!(err, NodeError::HeightRegression { .. }));
}

#[test]
fn export_round_trips_balances() {
    let mut app = null_app();
    app.init_genesis(&genesis(&["owner", "challenger"], 500)).unwrap();
    app.execute_block(&block(
        0,
        vec![DeclareCandidacyTx::new(addr("owner"), Identifier::new("cafe"), 100).into()],
    ))
    .unwrap();

    let exported = app.export_genesis().unwrap();
    assert_eq!(exported.total_supply().unwrap(), 900);

    let fresh = null_app();
    fresh.init_genesis(&exported).unwrap();
    assert_eq!(fresh.balance(&addr("owner")).unwrap(), 400);
}

// ---------------------------------------------------------------------------
// LMDB pipeline
// ---------------------------------------------------------------------------

#[test]
fn lmdb_state_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("registry");
    let id = Identifier::new("coffee");
    let nonces = NullNonces::sequential(4);
    let blocks = contested_blocks(&id, &nonces);
    let (first, rest) = blocks.split_at(3);

    {
        let mut app =
            open_lmdb_app(&path, MAP_SIZE, RegistryParams::registry_defaults()).unwrap();
        app.init_genesis(&genesis(&PARTICIPANTS, 1_000)).unwrap();
        for b in first {
            app.execute_block(b).unwrap();
        }
        assert_eq!(app.phase_of(&id).unwrap(), Some(BallotPhase::Committing));
    }

    let mut app =
        open_lmdb_app(&path, MAP_SIZE, RegistryParams::registry_defaults()).unwrap();
    assert_eq!(app.last_height().unwrap(), Some(BlockHeight::new(10)));
    assert!(matches!(
        app.init_genesis(&genesis(&["owner"], 1)),
        Err(NodeError::GenesisAlreadyApplied)
    ));
    for b in rest {
        assert!(app.execute_block(b).unwrap().iter().all(|r| r.is_success()));
    }

    assert_eq!(app.listing(&id).unwrap().map(|l| l.votes), Some(300));
    assert_eq!(app.balance(&addr("v2")).unwrap(), 1_050);
    // the owner's deposit stays locked behind the listing
    assert_eq!(app.export_genesis().unwrap().total_supply().unwrap(), 5_800);
}

#[test]
fn lmdb_oversized_identifier_is_rejected_without_halting_block() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut app = open_lmdb_app(
        &dir.path().join("registry"),
        MAP_SIZE,
        RegistryParams::registry_defaults(),
    )
    .unwrap();
    app.init_genesis(&genesis(&["owner"], 1_000)).unwrap();
    let long = Identifier::new("x".repeat(600));
    let cafe = Identifier::new("cafe");

    let receipts = app
        .execute_block(&block(
            0,
            vec![
                DeclareCandidacyTx::new(addr("owner"), long.clone(), 100).into(),
                ChallengeTx::new(addr("owner"), long.clone(), 100).into(),
                DeclareCandidacyTx::new(addr("owner"), cafe.clone(), 100).into(),
            ],
        ))
        .unwrap();

    let accepted: Vec<bool> = receipts.iter().map(|r| r.is_success()).collect();
    assert_eq!(accepted, vec![false, false, true]);
    assert!(receipts[0].error.as_deref().unwrap_or_default().contains("limit"));
    assert!(app.ballot(&cafe).unwrap().is_some());
    assert_eq!(app.balance(&addr("owner")).unwrap(), 900);
}

#[test]
fn lmdb_rejects_missing_data_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let stale = dir.path().join("stale");
    std::fs::create_dir(&stale).unwrap();
    std::fs::write(stale.join("junk"), b"x").unwrap();
    let result = open_lmdb_app(&stale, MAP_SIZE, RegistryParams::registry_defaults());
    assert!(matches!(result, Err(NodeError::Integrity(_))));
}
