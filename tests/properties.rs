use partyhost::draw::{DrawOutcome, DrawTracker};
use partyhost::error::HostError;
use partyhost::roles::{build_roles, counts_by_role, MafiaTable};
use partyhost::types::{DeckKey, GameKind, Role, RoleQuota};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

fn quota() -> impl Strategy<Value = RoleQuota> {
    (0usize..8, 0usize..4, 0usize..4).prop_map(|(m, det, doc)| RoleQuota::new(m, det, doc))
}

proptest! {
    #[test]
    fn drawing_a_deck_never_repeats(items in prop::collection::vec("[a-z]{1,6}", 0..40), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut tracker = DrawTracker::new();
        let key = DeckKey::new(GameKind::Pictionary, "prop");

        let mut seen = HashSet::new();
        for _ in 0..items.len() {
            match tracker.draw_unique(&key, &items, &mut rng) {
                DrawOutcome::Drawn { index, prompt } => {
                    prop_assert!(seen.insert(index));
                    prop_assert_eq!(prompt, items[index].as_str());
                }
                DrawOutcome::Exhausted => prop_assert!(false, "exhausted after {} draws", seen.len()),
            }
        }
        prop_assert!(tracker.draw_unique(&key, &items, &mut rng).is_exhausted());

        tracker.reset_deck(&key);
        prop_assert_eq!(tracker.remaining(&key, items.len()), items.len());
    }

    #[test]
    fn feasible_quotas_fill_every_seat(players in 1usize..25, quota in quota(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = build_roles(players, &quota, &mut rng);

        if quota.special_total() > players {
            let infeasible = matches!(result, Err(HostError::InfeasibleQuota { .. }));
            prop_assert!(infeasible);
        } else {
            let roles = result.unwrap();
            prop_assert_eq!(roles.len(), players);

            let counts = counts_by_role(&roles);
            for role in Role::SPECIAL {
                prop_assert_eq!(counts.get(&role).copied().unwrap_or(0), quota.count(role));
            }
            prop_assert_eq!(
                counts.get(&Role::Villager).copied().unwrap_or(0),
                players - quota.special_total()
            );
        }
    }

    #[test]
    fn advancing_a_full_circle_returns_to_start(players in 1usize..25, start in 0usize..25) {
        let mut table = MafiaTable::new(vec![Role::Villager; players]).unwrap();
        for _ in 0..(start % players) {
            table.advance();
        }
        let origin = table.cursor().index;

        for _ in 0..players {
            table.reveal();
            table.advance();
            prop_assert!(!table.cursor().revealed);
            prop_assert!(table.cursor().index < players);
        }
        prop_assert_eq!(table.cursor().index, origin);
    }
}
