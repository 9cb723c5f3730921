//! In-memory `Store` used by tests and `STORE=memory` runs.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use time::OffsetDateTime;

use super::Store;
use crate::domain::{
    BoardCell, Card, CardId, Game, GameId, Phase, Player, PlayerId, Role, Room, Team,
};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Default)]
struct Tables {
    rooms: HashMap<String, Room>,
    players: Vec<Player>,
    games: Vec<Game>,
    cards: Vec<Card>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn player_mut(&mut self, player_id: PlayerId) -> Result<&mut Player, DomainError> {
        self.players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "player not found"))
    }

    fn game_mut(&mut self, game_id: GameId) -> Result<&mut Game, DomainError> {
        self.games
            .iter_mut()
            .find(|g| g.id == game_id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, "game not found"))
    }
}

/// Every call takes the single lock, so each call is atomic on its own.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_room(&self, room_id: &str) -> Result<Room, DomainError> {
        let room = Room {
            id: room_id.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables
            .lock()
            .rooms
            .insert(room.id.clone(), room.clone());
        Ok(room)
    }

    async fn find_room(&self, room_id: &str) -> Result<Option<Room>, DomainError> {
        Ok(self.tables.lock().rooms.get(room_id).cloned())
    }

    async fn upsert_player(
        &self,
        room_id: &str,
        session_id: &str,
        name: &str,
    ) -> Result<Player, DomainError> {
        let mut t = self.tables.lock();
        if let Some(p) = t
            .players
            .iter_mut()
            .find(|p| p.room_id == room_id && p.session_id == session_id)
        {
            p.name = name.to_string();
            p.is_online = true;
            return Ok(p.clone());
        }
        let player = Player {
            id: t.next_id(),
            room_id: room_id.to_string(),
            session_id: session_id.to_string(),
            name: name.to_string(),
            team: None,
            role: None,
            is_online: true,
        };
        t.players.push(player.clone());
        Ok(player)
    }

    async fn players_in_room(&self, room_id: &str) -> Result<Vec<Player>, DomainError> {
        let mut players: Vec<Player> = self
            .tables
            .lock()
            .players
            .iter()
            .filter(|p| p.room_id == room_id)
            .cloned()
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(players)
    }

    async fn find_player(
        &self,
        session_id: &str,
        room_id: &str,
    ) -> Result<Option<Player>, DomainError> {
        Ok(self
            .tables
            .lock()
            .players
            .iter()
            .find(|p| p.room_id == room_id && p.session_id == session_id)
            .cloned())
    }

    async fn set_team_role(
        &self,
        player_id: PlayerId,
        team: Option<Team>,
        role: Option<Role>,
    ) -> Result<(), DomainError> {
        let mut t = self.tables.lock();
        let p = t.player_mut(player_id)?;
        p.team = team;
        p.role = role;
        Ok(())
    }

    async fn set_online(&self, player_id: PlayerId, online: bool) -> Result<(), DomainError> {
        let mut t = self.tables.lock();
        t.player_mut(player_id)?.is_online = online;
        Ok(())
    }

    async fn reset_teams_and_roles(&self, room_id: &str) -> Result<(), DomainError> {
        let mut t = self.tables.lock();
        for p in t.players.iter_mut().filter(|p| p.room_id == room_id) {
            p.team = None;
            p.role = None;
        }
        Ok(())
    }

    async fn create_game(&self, room_id: &str, first_team: Team) -> Result<Game, DomainError> {
        let mut t = self.tables.lock();
        let game = Game {
            id: t.next_id(),
            room_id: room_id.to_string(),
            phase: Phase::Playing,
            current_team: first_team,
            current_clue: String::new(),
            current_number: 0,
            guesses_left: 0,
            winner: None,
            created_at: OffsetDateTime::now_utc(),
        };
        t.games.push(game.clone());
        Ok(game)
    }

    async fn active_game(&self, room_id: &str) -> Result<Option<Game>, DomainError> {
        // id breaks created_at ties
        Ok(self
            .tables
            .lock()
            .games
            .iter()
            .filter(|g| g.room_id == room_id && g.phase != Phase::Lobby)
            .max_by_key(|g| (g.created_at, g.id))
            .cloned())
    }

    async fn update_game(&self, game: &Game) -> Result<(), DomainError> {
        let mut t = self.tables.lock();
        let stored = t.game_mut(game.id)?;
        stored.phase = game.phase;
        stored.current_team = game.current_team;
        stored.current_clue = game.current_clue.clone();
        stored.current_number = game.current_number;
        stored.guesses_left = game.guesses_left;
        stored.winner = game.winner;
        Ok(())
    }

    async fn insert_cards(&self, game_id: GameId, cells: &[BoardCell]) -> Result<(), DomainError> {
        let mut t = self.tables.lock();
        for cell in cells {
            let id = t.next_id();
            t.cards.push(Card {
                id,
                game_id,
                word: cell.word.clone(),
                card_type: cell.card_type,
                position: cell.position,
                revealed: false,
                revealed_by: None,
            });
        }
        Ok(())
    }

    async fn cards_for_game(&self, game_id: GameId) -> Result<Vec<Card>, DomainError> {
        let mut cards: Vec<Card> = self
            .tables
            .lock()
            .cards
            .iter()
            .filter(|c| c.game_id == game_id)
            .cloned()
            .collect();
        cards.sort_by_key(|c| c.position);
        Ok(cards)
    }

    async fn reveal_card(&self, card_id: CardId, team: Team) -> Result<(), DomainError> {
        let mut t = self.tables.lock();
        let card = t
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Card, "card not found"))?;
        card.revealed = true;
        card.revealed_by = Some(team);
        Ok(())
    }

    async fn finish_game(&self, game_id: GameId, winner: Team) -> Result<(), DomainError> {
        let mut t = self.tables.lock();
        let game = t.game_mut(game_id)?;
        game.phase = Phase::Finished;
        game.winner = Some(winner);
        Ok(())
    }
}
