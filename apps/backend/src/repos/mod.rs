//! Persistence gateway for rooms, players, games, and cards.
//!
//! `Store` is the seam between the hub/services and storage. The sea-orm
//! implementation lives in `crate::adapters::SeaStore`; `MemoryStore` backs
//! tests and `STORE=memory` dev runs.

use async_trait::async_trait;

use crate::domain::{
    BoardCell, Card, CardId, Game, GameId, Phase, Player, PlayerId, Role, Room, RoomSnapshot, Team,
};
use crate::errors::domain::{DomainError, NotFoundKind};

pub mod memory;

pub use memory::MemoryStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn create_room(&self, room_id: &str) -> Result<Room, DomainError>;
    async fn find_room(&self, room_id: &str) -> Result<Option<Room>, DomainError>;

    /// Insert or rename the player for (room, session); always marks it online.
    async fn upsert_player(
        &self,
        room_id: &str,
        session_id: &str,
        name: &str,
    ) -> Result<Player, DomainError>;
    /// Players of a room ordered by name.
    async fn players_in_room(&self, room_id: &str) -> Result<Vec<Player>, DomainError>;
    async fn find_player(
        &self,
        session_id: &str,
        room_id: &str,
    ) -> Result<Option<Player>, DomainError>;
    async fn set_team_role(
        &self,
        player_id: PlayerId,
        team: Option<Team>,
        role: Option<Role>,
    ) -> Result<(), DomainError>;
    async fn set_online(&self, player_id: PlayerId, online: bool) -> Result<(), DomainError>;
    async fn reset_teams_and_roles(&self, room_id: &str) -> Result<(), DomainError>;

    /// New game in `playing` with `first_team` to move.
    async fn create_game(&self, room_id: &str, first_team: Team) -> Result<Game, DomainError>;
    /// Most recently created game of the room that is not in `lobby`.
    async fn active_game(&self, room_id: &str) -> Result<Option<Game>, DomainError>;
    /// Persist phase, turn, clue, guesses, and winner.
    async fn update_game(&self, game: &Game) -> Result<(), DomainError>;
    async fn insert_cards(&self, game_id: GameId, cells: &[BoardCell]) -> Result<(), DomainError>;
    /// Cards of a game ordered by position.
    async fn cards_for_game(&self, game_id: GameId) -> Result<Vec<Card>, DomainError>;
    async fn reveal_card(&self, card_id: CardId, team: Team) -> Result<(), DomainError>;
    async fn finish_game(&self, game_id: GameId, winner: Team) -> Result<(), DomainError>;

    /// Create a game together with its board and read the cards back with ids.
    async fn create_game_with_board(
        &self,
        room_id: &str,
        first_team: Team,
        cells: &[BoardCell],
    ) -> Result<(Game, Vec<Card>), DomainError> {
        let game = self.create_game(room_id, first_team).await?;
        self.insert_cards(game.id, cells).await?;
        let cards = self.cards_for_game(game.id).await?;
        Ok((game, cards))
    }

    /// Persist one guess: the revealed card plus the resulting game fields.
    async fn record_guess(
        &self,
        card_id: CardId,
        team: Team,
        game: &Game,
    ) -> Result<(), DomainError> {
        self.reveal_card(card_id, team).await?;
        match (game.phase, game.winner) {
            (Phase::Finished, Some(winner)) => self.finish_game(game.id, winner).await,
            _ => self.update_game(game).await,
        }
    }

    /// Room, roster, active game, and its cards in one read.
    async fn room_snapshot(&self, room_id: &str) -> Result<RoomSnapshot, DomainError> {
        let room = self
            .find_room(room_id)
            .await?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Room, "room not found"))?;
        let players = self.players_in_room(room_id).await?;
        let game = self.active_game(room_id).await?;
        let cards = match &game {
            Some(g) => self.cards_for_game(g.id).await?,
            None => Vec::new(),
        };
        Ok(RoomSnapshot {
            room,
            players,
            game,
            cards,
        })
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
