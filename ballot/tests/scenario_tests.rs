//! End-to-end registry scenarios against in-memory infrastructure.

use tcr_ballot::{ApplyOutcome, BallotEngine, BallotError, ChallengeOutcome};
use tcr_crypto::commit_vote;
use tcr_ledger::Ledger;
use tcr_nullables::{NullChain, NullLedger, NullNonces, NullStore};
use tcr_store::{BallotStore, ListingStore};
use tcr_types::{AccountAddress, BlockHeight, Identifier, Listing, RegistryParams};

fn addr(name: &str) -> AccountAddress {
    AccountAddress::new(format!("tcr_{name}"))
}

#[test]
fn unchallenged_candidate_is_listed_after_apply_stage() {
    let engine = BallotEngine::new(RegistryParams::registry_defaults());
    let store = NullStore::new();
    let ledger = NullLedger::with_balances([(addr("owner"), 100)]);
    let chain = NullChain::new(0);
    let id = Identifier::new("coffee");

    engine
        .declare_candidacy(&store, &ledger, chain.height(), &addr("owner"), &id, 100, "a cafe")
        .unwrap();
    assert_eq!(ledger.balance(&addr("owner")).unwrap(), 0);

    let outcome = engine.apply(&store, &ledger, chain.advance(10), &id).unwrap();
    assert_eq!(outcome, ApplyOutcome::Listed);
    assert_eq!(store.get_listing(&id).unwrap(), Some(Listing::new(id.clone(), 0)));
    assert_eq!(store.get_ballot(&id).unwrap().map(|b| b.details), Some("a cafe".to_string()));
}

#[test]
fn challenged_candidate_survives_with_majority() {
    let engine = BallotEngine::new(RegistryParams::registry_defaults());
    let store = NullStore::new();
    let ledger = NullLedger::with_balances(
        ["owner", "challenger", "v1", "v2", "v3", "v4"]
            .into_iter()
            .map(|n| (addr(n), 1_000)),
    );
    let nonces = NullNonces::sequential(4);
    let chain = NullChain::new(0);
    let id = Identifier::new("coffee");

    engine
        .declare_candidacy(&store, &ledger, chain.height(), &addr("owner"), &id, 200, "")
        .unwrap();
    let outcome = engine
        .challenge(&store, &ledger, chain.advance(5), &addr("challenger"), &id, 200)
        .unwrap();
    assert_eq!(
        outcome,
        ChallengeOutcome::Activated {
            end_commit_height: BlockHeight::new(15),
            end_reveal_height: BlockHeight::new(25),
        }
    );

    let ballots = [("v1", true, 150u128), ("v2", true, 150), ("v3", false, 60), ("v4", false, 40)];
    let mut secrets = Vec::new();
    chain.set(10);
    for (name, choice, _) in ballots {
        let nonce = nonces.next();
        let c = commit_vote(choice, &nonce);
        engine
            .commit(&store, chain.height(), &addr(name), &id, c.as_bytes())
            .unwrap();
        secrets.push(nonce);
    }

    chain.set(25);
    for ((name, choice, power), nonce) in ballots.iter().zip(&secrets) {
        engine
            .reveal(&store, &ledger, chain.height(), &addr(name), &id, *choice, nonce, *power)
            .unwrap();
    }

    let ballot = store.get_ballot(&id).unwrap().unwrap();
    assert_eq!((ballot.approve, ballot.deny), (300, 100));

    let outcome = engine.apply(&store, &ledger, chain.height(), &id).unwrap();
    assert_eq!(
        outcome,
        ApplyOutcome::OwnerWon {
            votes: 300,
            owner_reward: 100
        }
    );
    assert_eq!(store.get_listing(&id).unwrap().map(|l| l.votes), Some(300));

    // pool of 100 split 150:150 among approvers
    assert_eq!(engine.claim_reward(&store, &ledger, &addr("v1"), &id).unwrap(), 200);
    assert_eq!(engine.claim_reward(&store, &ledger, &addr("v2"), &id).unwrap(), 200);
    assert_eq!(engine.claim_reward(&store, &ledger, &addr("v3"), &id).unwrap(), 60);
    assert_eq!(engine.claim_reward(&store, &ledger, &addr("v4"), &id).unwrap(), 40);
    assert_eq!(ledger.balance(&addr("v1")).unwrap(), 1_050);
    assert_eq!(ledger.balance(&addr("v3")).unwrap(), 1_000);
    assert_eq!(ledger.balance(&addr("challenger")).unwrap(), 800);
    assert_eq!(ledger.balance(&addr("owner")).unwrap(), 900);
}

#[test]
fn lost_challenge_cannot_be_reapplied() {
    let engine = BallotEngine::new(RegistryParams::registry_defaults());
    let store = NullStore::new();
    let ledger = NullLedger::with_balances([(addr("owner"), 500), (addr("challenger"), 500)]);
    let id = Identifier::new("spam");

    engine
        .declare_candidacy(&store, &ledger, BlockHeight::new(0), &addr("owner"), &id, 100, "")
        .unwrap();
    engine
        .challenge(&store, &ledger, BlockHeight::new(1), &addr("challenger"), &id, 100)
        .unwrap();
    let outcome = engine.apply(&store, &ledger, BlockHeight::new(21), &id).unwrap();
    assert_eq!(outcome, ApplyOutcome::ChallengerWon { challenger_reward: 150 });
    assert!(matches!(
        engine.apply(&store, &ledger, BlockHeight::new(40), &id),
        Err(BallotError::AlreadySettled(_))
    ));
    assert!(!store.listing_exists(&id).unwrap());
    assert!(matches!(
        engine.challenge(&store, &ledger, BlockHeight::new(41), &addr("challenger"), &id, 100),
        Err(BallotError::AlreadyChallenged(_))
    ));
}

#[test]
fn queue_tracks_pending_candidates() {
    let engine = BallotEngine::new(RegistryParams::registry_defaults());
    let store = NullStore::new();
    let ledger = NullLedger::with_balances([(addr("owner"), 1_000), (addr("challenger"), 1_000)]);

    for (at, name) in [(3, "b"), (0, "c"), (3, "a")] {
        engine
            .declare_candidacy(&store, &ledger, BlockHeight::new(at), &addr("owner"), &Identifier::new(name), 100, "")
            .unwrap();
    }
    let due: Vec<_> = engine
        .queue(&store)
        .unwrap()
        .due(BlockHeight::new(13))
        .into_iter()
        .map(|i| i.as_str().to_string())
        .collect();
    assert_eq!(due, vec!["c", "a", "b"]);

    engine
        .challenge(&store, &ledger, BlockHeight::new(4), &addr("challenger"), &Identifier::new("c"), 100)
        .unwrap();
    let queue = engine.queue(&store).unwrap();
    assert_eq!(queue.peek().map(|i| i.identifier.as_str()), Some("a"));
    assert_eq!(queue.priority_of(&Identifier::new("c")), Some(BlockHeight::new(24)));

    engine.apply(&store, &ledger, BlockHeight::new(13), &Identifier::new("a")).unwrap();
    assert!(!engine.queue(&store).unwrap().contains(&Identifier::new("a")));
}

#[test]
fn settlement_reconciles_every_token() {
    let engine = BallotEngine::new(RegistryParams {
        dispensation_bps: 5_000,
        quorum_bps: 5_000,
        ..RegistryParams::registry_defaults()
    });
    let store = NullStore::new();
    let names = ["owner", "challenger", "small", "large", "against"];
    let ledger = NullLedger::with_balances(names.into_iter().map(|n| (addr(n), 1_000)));
    let supply = ledger.total();
    let id = Identifier::new("bakery");

    engine
        .declare_candidacy(&store, &ledger, BlockHeight::new(0), &addr("owner"), &id, 200, "")
        .unwrap();
    engine
        .challenge(&store, &ledger, BlockHeight::new(0), &addr("challenger"), &id, 200)
        .unwrap();
    let votes = [("small", true, 100u128), ("large", true, 300), ("against", false, 100)];
    for (i, (name, choice, _)) in votes.iter().enumerate() {
        let nonce = [i as u8 + 1; 32];
        let c = commit_vote(*choice, &nonce);
        engine
            .commit(&store, BlockHeight::new(5), &addr(name), &id, c.as_bytes())
            .unwrap();
    }
    for (i, (name, choice, power)) in votes.iter().enumerate() {
        let nonce = [i as u8 + 1; 32];
        engine
            .reveal(&store, &ledger, BlockHeight::new(15), &addr(name), &id, *choice, &nonce, *power)
            .unwrap();
    }

    let outcome = engine.apply(&store, &ledger, BlockHeight::new(20), &id).unwrap();
    assert_eq!(outcome, ApplyOutcome::OwnerWon { votes: 400, owner_reward: 100 });
    let paid: Vec<u128> = votes
        .iter()
        .map(|(name, _, _)| engine.claim_reward(&store, &ledger, &addr(name), &id).unwrap())
        .collect();
    assert_eq!(paid, vec![125, 375, 100]);

    // in: challenger 200 + voters 500; out: owner 100 + voters 600
    let paid_out = 100 + paid.iter().sum::<u128>();
    assert_eq!(paid_out, 200 + 500);
    // only the owner's deposit stays locked behind the listing
    assert_eq!(supply - ledger.total(), 200);
    assert_eq!(ledger.balance(&addr("owner")).unwrap(), 900);
    assert_eq!(ledger.balance(&addr("challenger")).unwrap(), 800);
}
