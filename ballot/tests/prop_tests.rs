use std::collections::BTreeSet;

use proptest::prelude::*;

use tcr_ballot::settlement::{owner_reward, quorum_reached, voter_pool, voter_reward};
use tcr_ballot::{ApplicationQueue, BallotEngine};
use tcr_crypto::commit_vote;
use tcr_ledger::Ledger;
use tcr_nullables::{NullLedger, NullStore};
use tcr_types::{AccountAddress, BlockHeight, Identifier, QueueItem, RegistryParams};

proptest! {
    /// Popping the queue always yields entries in `(priority, identifier)` order.
    #[test]
    fn queue_pops_sorted(entries in prop::collection::vec(("[a-e]{1,3}", 0u64..20), 0..40)) {
        let mut queue = ApplicationQueue::new();
        for (name, priority) in &entries {
            queue.push(QueueItem::new(Identifier::new(name.as_str()), BlockHeight::new(*priority)));
        }
        let distinct: BTreeSet<_> = entries.iter().map(|(n, _)| n.clone()).collect();
        prop_assert_eq!(queue.len(), distinct.len());

        let mut popped = Vec::new();
        while let Some(item) = queue.pop() {
            popped.push(item);
        }
        let mut sorted = popped.clone();
        sorted.sort();
        prop_assert_eq!(popped, sorted);
    }

    /// Random removals keep the heap consistent with a sorted reference.
    #[test]
    fn queue_remove_matches_reference(
        priorities in prop::collection::vec(0u64..50, 1..30),
        removals in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let mut queue = ApplicationQueue::new();
        let mut reference = BTreeSet::new();
        for (i, p) in priorities.iter().enumerate() {
            let item = QueueItem::new(Identifier::new(format!("c{i:02}")), BlockHeight::new(*p));
            queue.push(item.clone());
            reference.insert(item);
        }
        for idx in removals {
            if reference.is_empty() {
                break;
            }
            let victim = reference.iter().nth(idx.index(reference.len())).cloned();
            if let Some(victim) = victim {
                prop_assert!(queue.remove(&victim.identifier).is_some());
                reference.remove(&victim);
            }
        }
        prop_assert_eq!(queue.sorted(), reference.into_iter().collect::<Vec<_>>());
    }

    /// The owner's dispensation and the voter pool always add up to the bond.
    #[test]
    fn dispensation_plus_pool_is_bond(bond in any::<u64>(), bps in 0u32..=10_000) {
        let bond = u128::from(bond);
        prop_assert_eq!(owner_reward(bond, bps).unwrap() + voter_pool(bond, bps).unwrap(), bond);
    }

    /// Winning voters never receive more than their stakes plus the pool.
    #[test]
    fn voter_rewards_never_exceed_pool(
        powers in prop::collection::vec(1u128..1_000_000, 1..20),
        pool in 0u128..10_000_000,
    ) {
        let total: u128 = powers.iter().sum();
        let paid: u128 = powers
            .iter()
            .map(|p| voter_reward(*p, pool, total).unwrap())
            .sum();
        prop_assert!(paid <= total + pool);
        prop_assert!(paid >= total);
    }

    /// Quorum passes exactly when approve / total strictly exceeds the ratio.
    #[test]
    fn quorum_matches_rational_comparison(
        approve in 0u64..1_000_000,
        deny in 0u64..1_000_000,
        quorum in 0u32..=10_000,
    ) {
        let (a, d) = (u128::from(approve), u128::from(deny));
        let expected = a + d > 0 && a * 10_000 > (a + d) * u128::from(quorum);
        prop_assert_eq!(quorum_reached(a, d, quorum).unwrap(), expected);
    }

    /// After a full challenge round the tokens left locked are exactly the
    /// owner's deposit (when the owner wins) plus whatever of the voter pool
    /// was not paid out: truncation dust, or the whole pool when nobody
    /// voted with the outcome.
    #[test]
    fn settlement_conserves_tokens(
        votes in prop::collection::vec((any::<bool>(), 1u128..500), 1..8),
        dispensation_bps in 0u32..=10_000,
        quorum_bps in 0u32..=10_000,
    ) {
        let params = RegistryParams {
            dispensation_bps,
            quorum_bps,
            ..RegistryParams::registry_defaults()
        };
        let engine = BallotEngine::new(params);
        let store = NullStore::new();
        let owner = AccountAddress::new("tcr_owner");
        let challenger = AccountAddress::new("tcr_challenger");
        let voters: Vec<_> = (0..votes.len())
            .map(|i| AccountAddress::new(format!("tcr_voter{i}")))
            .collect();
        let ledger = NullLedger::with_balances(
            [owner.clone(), challenger.clone()]
                .into_iter()
                .chain(voters.iter().cloned())
                .map(|a| (a, 10_000)),
        );
        let supply = ledger.total();
        let id = Identifier::new("listing");
        let at = BlockHeight::new;

        engine.declare_candidacy(&store, &ledger, at(0), &owner, &id, 300, "").unwrap();
        engine.challenge(&store, &ledger, at(1), &challenger, &id, 300).unwrap();
        for (i, (choice, power)) in votes.iter().enumerate() {
            let nonce = [i as u8; 32];
            let c = commit_vote(*choice, &nonce);
            engine.commit(&store, at(2), &voters[i], &id, c.as_bytes()).unwrap();
            engine.reveal(&store, &ledger, at(12), &voters[i], &id, *choice, &nonce, *power).unwrap();
        }
        engine.apply(&store, &ledger, at(21), &id).unwrap();
        for voter in &voters {
            engine.claim_reward(&store, &ledger, voter, &id).unwrap();
        }

        let approve: u128 = votes.iter().filter(|(c, _)| *c).map(|(_, p)| p).sum();
        let deny: u128 = votes.iter().filter(|(c, _)| !*c).map(|(_, p)| p).sum();
        let owner_won = quorum_reached(approve, deny, quorum_bps).unwrap();
        let (winner_side, winning_total) = if owner_won { (true, approve) } else { (false, deny) };
        let pool = voter_pool(300, dispensation_bps).unwrap();
        let shares_paid: u128 = votes
            .iter()
            .filter(|(c, _)| *c == winner_side)
            .map(|(_, p)| voter_reward(*p, pool, winning_total).unwrap() - p)
            .sum();
        let owner_deposit = if owner_won { 300 } else { 0 };
        let expected_locked = owner_deposit + pool - shares_paid;

        prop_assert_eq!(supply - ledger.total(), expected_locked);
        if winning_total == 0 {
            prop_assert_eq!(expected_locked, pool);
        } else {
            // dust is below one token per winning voter
            prop_assert!(pool - shares_paid < votes.len() as u128);
        }
        let expected_owner = 10_000 - 300 + if owner_won { owner_reward(300, dispensation_bps).unwrap() } else { 0 };
        prop_assert_eq!(ledger.balance(&owner).unwrap(), expected_owner);
    }
}
