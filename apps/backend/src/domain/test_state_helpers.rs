// Builders for engine and view tests.

use time::OffsetDateTime;

use super::board::{ASSASSIN_CARDS, FIRST_TEAM_CARDS, NEUTRAL_CARDS, SECOND_TEAM_CARDS};
use super::model::{Card, Game, Player, Room, RoomSnapshot};
use super::types::{CardType, Phase, PlayerId, Role, Team};

pub const ROOM: &str = "ROOM0001";
pub const GAME_ID: i64 = 7;

pub struct MakeGameArgs {
    pub phase: Phase,
    pub current_team: Team,
    pub clue: &'static str,
    pub number: i32,
    pub guesses_left: i32,
}

impl Default for MakeGameArgs {
    fn default() -> Self {
        Self {
            phase: Phase::Playing,
            current_team: Team::Red,
            clue: "",
            number: 0,
            guesses_left: 0,
        }
    }
}

pub fn make_game(args: MakeGameArgs) -> Game {
    Game {
        id: GAME_ID,
        room_id: ROOM.to_string(),
        phase: args.phase,
        current_team: args.current_team,
        current_clue: args.clue.to_string(),
        current_number: args.number,
        guesses_left: args.guesses_left,
        winner: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

pub fn make_player(id: PlayerId, name: &str, team: Option<Team>, role: Option<Role>) -> Player {
    Player {
        id,
        room_id: ROOM.to_string(),
        session_id: format!("session-{name}"),
        name: name.to_string(),
        team,
        role,
        is_online: true,
    }
}

/// A(red spymaster), B(red operative), C(blue spymaster), D(blue operative).
pub fn ready_roster() -> Vec<Player> {
    vec![
        make_player(1, "A", Some(Team::Red), Some(Role::Spymaster)),
        make_player(2, "B", Some(Team::Red), Some(Role::Operative)),
        make_player(3, "C", Some(Team::Blue), Some(Role::Spymaster)),
        make_player(4, "D", Some(Team::Blue), Some(Role::Operative)),
    ]
}

/// Unshuffled layout: first team at 0..9, second at 9..17, neutral at 17..24, assassin at 24.
pub fn ordered_layout(first: Team) -> Vec<CardType> {
    let mut layout = Vec::new();
    layout.extend(std::iter::repeat_n(CardType::from(first), FIRST_TEAM_CARDS));
    layout.extend(std::iter::repeat_n(
        CardType::from(first.opposite()),
        SECOND_TEAM_CARDS,
    ));
    layout.extend(std::iter::repeat_n(CardType::Neutral, NEUTRAL_CARDS));
    layout.extend(std::iter::repeat_n(CardType::Assassin, ASSASSIN_CARDS));
    layout
}

/// Card ids are `100 + position`.
pub fn make_cards(layout: &[CardType]) -> Vec<Card> {
    layout
        .iter()
        .enumerate()
        .map(|(pos, &card_type)| Card {
            id: 100 + pos as i64,
            game_id: GAME_ID,
            word: format!("word{pos}"),
            card_type,
            position: pos as i16,
            revealed: false,
            revealed_by: None,
        })
        .collect()
}

pub fn card_id_at(position: usize) -> i64 {
    100 + position as i64
}

pub fn make_snapshot(players: Vec<Player>, game: Option<Game>, cards: Vec<Card>) -> RoomSnapshot {
    RoomSnapshot {
        room: Room {
            id: ROOM.to_string(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        },
        players,
        game,
        cards,
    }
}
