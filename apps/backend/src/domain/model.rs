//! Persistent entities as the rest of the crate sees them.
//!
//! These are storage-agnostic: the sea-orm adapter and the in-memory store
//! both convert to and from these types. `session_id` never leaves the
//! server, so it is skipped on serialization.

use serde::Serialize;
use time::OffsetDateTime;

use super::types::{empty_as_none, CardId, CardType, GameId, Phase, PlayerId, Role, RoomId, Team};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub id: RoomId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub room_id: RoomId,
    #[serde(skip)]
    pub session_id: String,
    pub name: String,
    #[serde(with = "empty_as_none")]
    pub team: Option<Team>,
    #[serde(with = "empty_as_none")]
    pub role: Option<Role>,
    pub is_online: bool,
}

impl Player {
    pub fn is_spymaster(&self) -> bool {
        self.role == Some(Role::Spymaster)
    }

    pub fn is_operative(&self) -> bool {
        self.role == Some(Role::Operative)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    pub id: GameId,
    pub room_id: RoomId,
    pub phase: Phase,
    pub current_team: Team,
    pub current_clue: String,
    pub current_number: i32,
    pub guesses_left: i32,
    #[serde(with = "empty_as_none")]
    pub winner: Option<Team>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Game {
    pub fn has_clue(&self) -> bool {
        !self.current_clue.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub game_id: GameId,
    pub word: String,
    pub card_type: CardType,
    pub position: i16,
    pub revealed: bool,
    pub revealed_by: Option<Team>,
}

/// One board position produced by the generator, before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCell {
    pub word: String,
    pub card_type: CardType,
    pub position: i16,
}

/// Everything a broadcast needs, read once per room operation.
#[derive(Debug, Clone)]
pub struct RoomSnapshot {
    pub room: Room,
    pub players: Vec<Player>,
    pub game: Option<Game>,
    pub cards: Vec<Card>,
}

impl RoomSnapshot {
    pub fn viewer(&self, session_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.session_id == session_id)
    }
}
