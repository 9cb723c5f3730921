// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::types::{Role, Team};

pub fn team() -> impl Strategy<Value = Team> {
    prop_oneof![Just(Team::Red), Just(Team::Blue)]
}

pub fn optional_team() -> impl Strategy<Value = Option<Team>> {
    prop_oneof![Just(None), team().prop_map(Some)]
}

pub fn optional_role() -> impl Strategy<Value = Option<Role>> {
    prop_oneof![
        Just(None),
        Just(Some(Role::Spymaster)),
        Just(Some(Role::Operative)),
    ]
}

/// Up to 10 players with arbitrary team/role assignments.
pub fn roster_slots() -> impl Strategy<Value = Vec<(Option<Team>, Option<Role>)>> {
    prop::collection::vec((optional_team(), optional_role()), 0..10)
}
