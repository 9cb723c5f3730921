//! Per-viewer projection of a room snapshot.

use serde::Serialize;

use super::model::{Card, Game, Player, Room, RoomSnapshot};
use super::types::{empty_as_none, CardId, CardType, Phase, Team};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: CardId,
    pub word: String,
    /// Empty unless the viewer may see the card's allegiance.
    #[serde(with = "empty_as_none")]
    pub card_type: Option<CardType>,
    pub position: i16,
    pub revealed: bool,
    #[serde(with = "empty_as_none")]
    pub revealed_by: Option<Team>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomState {
    pub room: Room,
    pub players: Vec<Player>,
    pub game: Option<Game>,
    pub cards: Vec<CardView>,
}

fn card_view(card: &Card, reveal_all: bool) -> CardView {
    CardView {
        id: card.id,
        word: card.word.clone(),
        card_type: (reveal_all || card.revealed).then_some(card.card_type),
        position: card.position,
        revealed: card.revealed,
        revealed_by: card.revealed_by,
    }
}

/// Project `snapshot` for `viewer`. A missing viewer sees what an operative sees.
pub fn project(snapshot: &RoomSnapshot, viewer: Option<&Player>) -> RoomState {
    let finished = snapshot
        .game
        .as_ref()
        .is_some_and(|g| g.phase == Phase::Finished);
    let reveal_all = finished || viewer.is_some_and(Player::is_spymaster);

    RoomState {
        room: snapshot.room.clone(),
        players: snapshot.players.clone(),
        game: snapshot.game.clone(),
        cards: snapshot
            .cards
            .iter()
            .map(|c| card_view(c, reveal_all))
            .collect(),
    }
}

/// Project for the connection bound to `session_id`.
pub fn project_for_session(snapshot: &RoomSnapshot, session_id: &str) -> RoomState {
    project(snapshot, snapshot.viewer(session_id))
}
