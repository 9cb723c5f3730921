//! `Store` wrapper that parks one team/role write until the test releases it.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use backend::domain::{
    BoardCell, Card, CardId, Game, GameId, Player, PlayerId, Role, Room, Team,
};
use backend::errors::domain::DomainError;
use backend::repos::{MemoryStore, Store};
use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Default)]
pub struct GatedStore {
    inner: MemoryStore,
    held: Mutex<Option<PlayerId>>,
    entered: Notify,
    release: Notify,
    team_role_calls: Mutex<HashMap<PlayerId, usize>>,
}

impl GatedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `set_team_role` for `player_id` waits for `release`.
    pub fn hold(&self, player_id: PlayerId) {
        *self.held.lock() = Some(player_id);
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    /// Wait until the held write has started.
    pub async fn wait_until_held(&self) {
        tokio::time::timeout(Duration::from_secs(2), self.entered.notified())
            .await
            .expect("held write never started");
    }

    pub fn team_role_calls(&self, player_id: PlayerId) -> usize {
        self.team_role_calls
            .lock()
            .get(&player_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl Store for GatedStore {
    async fn create_room(&self, room_id: &str) -> Result<Room, DomainError> {
        self.inner.create_room(room_id).await
    }

    async fn find_room(&self, room_id: &str) -> Result<Option<Room>, DomainError> {
        self.inner.find_room(room_id).await
    }

    async fn upsert_player(
        &self,
        room_id: &str,
        session_id: &str,
        name: &str,
    ) -> Result<Player, DomainError> {
        self.inner.upsert_player(room_id, session_id, name).await
    }

    async fn players_in_room(&self, room_id: &str) -> Result<Vec<Player>, DomainError> {
        self.inner.players_in_room(room_id).await
    }

    async fn find_player(
        &self,
        session_id: &str,
        room_id: &str,
    ) -> Result<Option<Player>, DomainError> {
        self.inner.find_player(session_id, room_id).await
    }

    async fn set_team_role(
        &self,
        player_id: PlayerId,
        team: Option<Team>,
        role: Option<Role>,
    ) -> Result<(), DomainError> {
        *self.team_role_calls.lock().entry(player_id).or_default() += 1;
        let gated = {
            let mut held = self.held.lock();
            if *held == Some(player_id) {
                *held = None;
                true
            } else {
                false
            }
        };
        if gated {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.set_team_role(player_id, team, role).await
    }

    async fn set_online(&self, player_id: PlayerId, online: bool) -> Result<(), DomainError> {
        self.inner.set_online(player_id, online).await
    }

    async fn reset_teams_and_roles(&self, room_id: &str) -> Result<(), DomainError> {
        self.inner.reset_teams_and_roles(room_id).await
    }

    async fn create_game(&self, room_id: &str, first_team: Team) -> Result<Game, DomainError> {
        self.inner.create_game(room_id, first_team).await
    }

    async fn active_game(&self, room_id: &str) -> Result<Option<Game>, DomainError> {
        self.inner.active_game(room_id).await
    }

    async fn update_game(&self, game: &Game) -> Result<(), DomainError> {
        self.inner.update_game(game).await
    }

    async fn insert_cards(&self, game_id: GameId, cells: &[BoardCell]) -> Result<(), DomainError> {
        self.inner.insert_cards(game_id, cells).await
    }

    async fn cards_for_game(&self, game_id: GameId) -> Result<Vec<Card>, DomainError> {
        self.inner.cards_for_game(game_id).await
    }

    async fn reveal_card(&self, card_id: CardId, team: Team) -> Result<(), DomainError> {
        self.inner.reveal_card(card_id, team).await
    }

    async fn finish_game(&self, game_id: GameId, winner: Team) -> Result<(), DomainError> {
        self.inner.finish_game(game_id, winner).await
    }
}
