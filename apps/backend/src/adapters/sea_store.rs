//! `Store` backed by sea-orm (Postgres or SQLite).

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};

use super::cards_sea::{self, CardCreate};
use super::games_sea::{self, GameUpdate};
use super::{players_sea, rooms_sea};
use crate::domain::{
    BoardCell, Card, CardId, Game, GameId, Phase, Player, PlayerId, Role, Room, Team,
};
use crate::errors::domain::DomainError;
use crate::repos::Store;

#[derive(Clone)]
pub struct SeaStore {
    db: DatabaseConnection,
}

impl SeaStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn game_update(game: &Game) -> GameUpdate {
    GameUpdate {
        id: game.id,
        phase: game.phase.into(),
        current_team: game.current_team.into(),
        current_clue: game.current_clue.clone(),
        current_number: game.current_number,
        guesses_left: game.guesses_left,
        winner: game.winner.map(Into::into),
    }
}

fn card_rows(cells: &[BoardCell]) -> Vec<CardCreate> {
    cells
        .iter()
        .map(|c| CardCreate {
            word: c.word.clone(),
            card_type: c.card_type.into(),
            position: c.position,
        })
        .collect()
}

#[async_trait]
impl Store for SeaStore {
    async fn create_room(&self, room_id: &str) -> Result<Room, DomainError> {
        Ok(rooms_sea::create_room(&self.db, room_id).await?.into())
    }

    async fn find_room(&self, room_id: &str) -> Result<Option<Room>, DomainError> {
        Ok(rooms_sea::find_by_id(&self.db, room_id).await?.map(Room::from))
    }

    async fn upsert_player(
        &self,
        room_id: &str,
        session_id: &str,
        name: &str,
    ) -> Result<Player, DomainError> {
        Ok(players_sea::upsert(&self.db, room_id, session_id, name)
            .await?
            .into())
    }

    async fn players_in_room(&self, room_id: &str) -> Result<Vec<Player>, DomainError> {
        Ok(players_sea::list_by_room(&self.db, room_id)
            .await?
            .into_iter()
            .map(Player::from)
            .collect())
    }

    async fn find_player(
        &self,
        session_id: &str,
        room_id: &str,
    ) -> Result<Option<Player>, DomainError> {
        Ok(players_sea::find_by_session(&self.db, session_id, room_id)
            .await?
            .map(Player::from))
    }

    async fn set_team_role(
        &self,
        player_id: PlayerId,
        team: Option<Team>,
        role: Option<Role>,
    ) -> Result<(), DomainError> {
        players_sea::set_team_role(
            &self.db,
            player_id,
            team.map(Into::into),
            role.map(Into::into),
        )
        .await?;
        Ok(())
    }

    async fn set_online(&self, player_id: PlayerId, online: bool) -> Result<(), DomainError> {
        players_sea::set_online(&self.db, player_id, online).await?;
        Ok(())
    }

    async fn reset_teams_and_roles(&self, room_id: &str) -> Result<(), DomainError> {
        players_sea::reset_teams_and_roles(&self.db, room_id).await?;
        Ok(())
    }

    async fn create_game(&self, room_id: &str, first_team: Team) -> Result<Game, DomainError> {
        Ok(games_sea::create_game(&self.db, room_id, first_team.into())
            .await?
            .into())
    }

    async fn active_game(&self, room_id: &str) -> Result<Option<Game>, DomainError> {
        Ok(games_sea::find_active(&self.db, room_id)
            .await?
            .map(Game::from))
    }

    async fn update_game(&self, game: &Game) -> Result<(), DomainError> {
        games_sea::update_game(&self.db, game_update(game)).await?;
        Ok(())
    }

    async fn insert_cards(&self, game_id: GameId, cells: &[BoardCell]) -> Result<(), DomainError> {
        cards_sea::insert_many(&self.db, game_id, card_rows(cells)).await?;
        Ok(())
    }

    async fn cards_for_game(&self, game_id: GameId) -> Result<Vec<Card>, DomainError> {
        Ok(cards_sea::list_by_game(&self.db, game_id)
            .await?
            .into_iter()
            .map(Card::from)
            .collect())
    }

    async fn reveal_card(&self, card_id: CardId, team: Team) -> Result<(), DomainError> {
        cards_sea::reveal(&self.db, card_id, team.into()).await?;
        Ok(())
    }

    async fn finish_game(&self, game_id: GameId, winner: Team) -> Result<(), DomainError> {
        games_sea::finish_game(&self.db, game_id, winner.into()).await?;
        Ok(())
    }

    // Game row and its 25 cards land together or not at all.
    async fn create_game_with_board(
        &self,
        room_id: &str,
        first_team: Team,
        cells: &[BoardCell],
    ) -> Result<(Game, Vec<Card>), DomainError> {
        let txn = self.db.begin().await?;
        let game = games_sea::create_game(&txn, room_id, first_team.into()).await?;
        cards_sea::insert_many(&txn, game.id, card_rows(cells)).await?;
        let cards = cards_sea::list_by_game(&txn, game.id).await?;
        txn.commit().await?;

        Ok((
            game.into(),
            cards.into_iter().map(Card::from).collect(),
        ))
    }

    async fn record_guess(
        &self,
        card_id: CardId,
        team: Team,
        game: &Game,
    ) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;
        cards_sea::reveal(&txn, card_id, team.into()).await?;
        match (game.phase, game.winner) {
            (Phase::Finished, Some(winner)) => {
                games_sea::finish_game(&txn, game.id, winner.into()).await?
            }
            _ => games_sea::update_game(&txn, game_update(game)).await?,
        }
        txn.commit().await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        self.db.ping().await?;
        Ok(())
    }
}
