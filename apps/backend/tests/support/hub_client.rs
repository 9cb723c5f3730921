//! Drive the hub with actor messages and read what it pushes into outboxes.

use std::time::Duration;

use backend::domain::{Player, Role, RoomState, Team};
use backend::state::AppState;
use backend::ws::{ClientCommand, ConnId, Connect, Disconnect, Dispatch, Outbox, ServerMsg};
use uuid::Uuid;

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

pub struct TestConn {
    pub conn_id: ConnId,
    pub outbox: Outbox,
    state: AppState,
}

impl TestConn {
    pub fn open(state: &AppState, player: &Player) -> Self {
        Self::open_with_capacity(state, player, 64)
    }

    pub fn open_with_capacity(state: &AppState, player: &Player, capacity: usize) -> Self {
        let conn = Self {
            conn_id: Uuid::new_v4(),
            outbox: Outbox::new(capacity),
            state: state.clone(),
        };
        state.hub().do_send(Connect {
            conn_id: conn.conn_id,
            room_id: player.room_id.clone(),
            session_id: player.session_id.clone(),
            player_id: player.id,
            outbox: conn.outbox.clone(),
        });
        conn
    }

    pub fn send(&self, command: ClientCommand) {
        self.state.hub().do_send(Dispatch {
            conn_id: self.conn_id,
            command,
        });
    }

    pub fn close(&self) {
        self.state.hub().do_send(Disconnect {
            conn_id: self.conn_id,
        });
    }

    pub async fn next(&self) -> Option<ServerMsg> {
        tokio::time::timeout(RECV_TIMEOUT, self.outbox.recv())
            .await
            .ok()
            .flatten()
    }

    pub async fn next_state(&self) -> RoomState {
        match self.next().await {
            Some(ServerMsg::RoomState { state }) => state,
            other => panic!("expected room_state, got {other:?}"),
        }
    }

    pub async fn next_error(&self) -> String {
        match self.next().await {
            Some(ServerMsg::Error { error }) => error,
            other => panic!("expected error, got {other:?}"),
        }
    }
}

/// A room with four joined players named A, B, C and D (unassigned).
pub async fn seed_room(state: &AppState) -> (String, Vec<Player>) {
    let room = state.rooms().create_room().await.unwrap();
    let mut players = Vec::new();
    for name in ["A", "B", "C", "D"] {
        let player = state
            .rooms()
            .join_room(&room.id, &format!("session-{name}"), name)
            .await
            .unwrap();
        players.push(player);
    }
    (room.id, players)
}

/// A red spymaster, B red operative, C blue spymaster, D blue operative.
pub async fn assign_standard_teams(state: &AppState, players: &[Player]) {
    let seats = [
        (Team::Red, Role::Spymaster),
        (Team::Red, Role::Operative),
        (Team::Blue, Role::Spymaster),
        (Team::Blue, Role::Operative),
    ];
    for (player, (team, role)) in players.iter().zip(seats) {
        state
            .rooms()
            .join_team(player, Some(team), Some(role))
            .await
            .unwrap();
    }
}
