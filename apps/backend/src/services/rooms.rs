//! Room lifecycle and lobby operations.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::view::{self, RoomState};
use crate::domain::{Player, Role, Room, Team};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::repos::Store;
use crate::utils::room_code::generate_room_code;

const ROOM_CODE_ATTEMPTS: usize = 5;
const MAX_NAME_LEN: usize = 64;

#[derive(Clone)]
pub struct RoomService {
    store: Arc<dyn Store>,
}

impl RoomService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create a room under a fresh code, retrying on the rare collision.
    pub async fn create_room(&self) -> Result<Room, DomainError> {
        for _ in 0..ROOM_CODE_ATTEMPTS {
            let code = generate_room_code();
            if self.store.find_room(&code).await?.is_some() {
                warn!(room_id = %code, "Room code collision, retrying");
                continue;
            }
            let room = self.store.create_room(&code).await?;
            info!(room_id = %room.id, "Room created");
            return Ok(room);
        }
        Err(DomainError::infra(
            InfraErrorKind::Other("room_code".into()),
            "could not allocate a room code",
        ))
    }

    /// Public view of a room: nobody's spymaster.
    pub async fn room_state(&self, room_id: &str) -> Result<RoomState, DomainError> {
        let snapshot = self.store.room_snapshot(room_id).await?;
        Ok(view::project(&snapshot, None))
    }

    /// Register (or rename) the player bound to `session_id` in an existing room.
    pub async fn join_room(
        &self,
        room_id: &str,
        session_id: &str,
        name: &str,
    ) -> Result<Player, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::MissingField,
                "name is required",
            ));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(
                ValidationKind::Other("NAME_TOO_LONG".into()),
                format!("name must be at most {MAX_NAME_LEN} characters"),
            ));
        }
        if self.store.find_room(room_id).await?.is_none() {
            return Err(DomainError::not_found(NotFoundKind::Room, "room not found"));
        }
        let player = self.store.upsert_player(room_id, session_id, name).await?;
        info!(room_id, player_id = player.id, "Player joined");
        Ok(player)
    }

    pub async fn require_player(
        &self,
        session_id: &str,
        room_id: &str,
    ) -> Result<Player, DomainError> {
        self.store
            .find_player(session_id, room_id)
            .await?
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "player not found"))
    }

    /// `team = None` leaves the current team.
    pub async fn join_team(
        &self,
        player: &Player,
        team: Option<Team>,
        role: Option<Role>,
    ) -> Result<(), DomainError> {
        self.store.set_team_role(player.id, team, role).await
    }

    /// Change role while keeping the current team.
    pub async fn set_role(&self, player: &Player, role: Role) -> Result<(), DomainError> {
        self.store
            .set_team_role(player.id, player.team, Some(role))
            .await
    }

    /// Send everyone back to the lobby: clear every team and role in the room.
    /// Game and card history stays.
    pub async fn reset_roles(&self, room_id: &str) -> Result<(), DomainError> {
        self.store.reset_teams_and_roles(room_id).await?;
        info!(room_id, "Teams and roles reset");
        Ok(())
    }
}
