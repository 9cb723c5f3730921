//! Property: a roster can start iff each team has exactly one spymaster
//! and at least one operative.

use proptest::prelude::*;

use crate::domain::engine::can_start_game;
use crate::domain::test_state_helpers::make_player;
use crate::domain::types::{Role, Team};
use crate::domain::{test_gens, test_prelude};
use crate::errors::domain::{DomainError, ValidationKind};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_start_iff_roster_is_complete(slots in test_gens::roster_slots()) {
        let roster: Vec<_> = slots
            .iter()
            .enumerate()
            .map(|(i, (team, role))| make_player(i as i64 + 1, &format!("p{i}"), *team, *role))
            .collect();

        let count = |team: Team, role: Role| {
            slots
                .iter()
                .filter(|(t, r)| *t == Some(team) && *r == Some(role))
                .count()
        };
        let expected_ok = count(Team::Red, Role::Spymaster) == 1
            && count(Team::Blue, Role::Spymaster) == 1
            && count(Team::Red, Role::Operative) >= 1
            && count(Team::Blue, Role::Operative) >= 1;

        match can_start_game(&roster) {
            Ok(()) => prop_assert!(expected_ok),
            Err(DomainError::Validation(ValidationKind::TeamComposition, _)) => {
                prop_assert!(!expected_ok)
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn prop_roster_order_is_irrelevant(mut slots in test_gens::roster_slots()) {
        let build = |slots: &[(Option<Team>, Option<Role>)]| -> Vec<_> {
            slots
                .iter()
                .enumerate()
                .map(|(i, (team, role))| make_player(i as i64 + 1, &format!("p{i}"), *team, *role))
                .collect()
        };
        let forward = can_start_game(&build(&slots)).is_ok();
        slots.reverse();
        prop_assert_eq!(forward, can_start_game(&build(&slots)).is_ok());
    }
}
