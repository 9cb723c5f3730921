use crate::domain::test_state_helpers::{
    make_cards, make_game, make_snapshot, ordered_layout, ready_roster, MakeGameArgs,
};
use crate::domain::types::{Phase, Team};
use crate::domain::view::{project, project_for_session};

fn snapshot_with_reveal(phase: Phase) -> crate::domain::model::RoomSnapshot {
    let game = make_game(MakeGameArgs {
        phase,
        ..Default::default()
    });
    let mut cards = make_cards(&ordered_layout(Team::Red));
    cards[4].revealed = true;
    cards[4].revealed_by = Some(Team::Red);
    make_snapshot(ready_roster(), Some(game), cards)
}

#[test]
fn operative_sees_only_revealed_types() {
    let snapshot = snapshot_with_reveal(Phase::Playing);
    let state = project_for_session(&snapshot, "session-B");
    for card in &state.cards {
        assert_eq!(card.card_type.is_some(), card.revealed, "card {}", card.position);
    }
}

#[test]
fn spymaster_sees_everything() {
    let snapshot = snapshot_with_reveal(Phase::Playing);
    let state = project_for_session(&snapshot, "session-C");
    assert!(state.cards.iter().all(|c| c.card_type.is_some()));
}

#[test]
fn finished_game_reveals_all_to_everyone() {
    let snapshot = snapshot_with_reveal(Phase::Finished);
    let state = project(&snapshot, None);
    assert!(state.cards.iter().all(|c| c.card_type.is_some()));
}

#[test]
fn unknown_viewer_is_treated_as_operative() {
    let snapshot = snapshot_with_reveal(Phase::Playing);
    let state = project_for_session(&snapshot, "nobody");
    assert_eq!(state.cards.iter().filter(|c| c.card_type.is_some()).count(), 1);
}

#[test]
fn wire_shape_hides_session_and_uses_empty_strings() {
    let snapshot = snapshot_with_reveal(Phase::Playing);
    let state = project_for_session(&snapshot, "session-B");
    let json = serde_json::to_value(&state).unwrap();

    let player = &json["players"][0];
    assert!(player.get("session_id").is_none());
    assert_eq!(player["team"], "red");

    let hidden = &json["cards"][0];
    assert_eq!(hidden["card_type"], "");
    assert_eq!(hidden["revealed_by"], "");
    let shown = &json["cards"][4];
    assert_eq!(shown["card_type"], "red");
    assert_eq!(shown["revealed_by"], "red");

    assert_eq!(json["game"]["winner"], "");
    assert_eq!(json["game"]["phase"], "playing");
    assert_eq!(json["room"]["created_at"], "1970-01-01T00:00:00Z");
}

#[test]
fn lobby_room_has_null_game_and_no_cards() {
    let snapshot = make_snapshot(ready_roster(), None, Vec::new());
    let json = serde_json::to_value(project(&snapshot, None)).unwrap();
    assert!(json["game"].is_null());
    assert_eq!(json["cards"].as_array().map(Vec::len), Some(0));
}
