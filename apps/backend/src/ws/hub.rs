//! Room hub: the single owner of live connections.
//!
//! Every registration, unregistration and command is queued on its room's
//! lane and executed one at a time; different rooms run concurrently as
//! separate futures on the hub's context. After each operation the hub loads
//! one room snapshot and pushes a per-viewer projection of it to every live
//! connection in the room. Failed commands only answer the originator.
//!
//! A connection whose outbox overflows on `stall_limit` broadcasts in a row
//! has not drained a single frame in that time; the hub evicts it as if it
//! had disconnected.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use actix::prelude::*;
use futures::future::{FutureExt, LocalBoxFuture};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::view;
use crate::domain::{PlayerId, RoomId, RoomSnapshot};
use crate::errors::domain::DomainError;
use crate::repos::Store;
use crate::services::{GameFlowService, RoomService};
use crate::ws::outbox::{Outbox, PushOutcome};
use crate::ws::protocol::{ClientCommand, ServerMsg};

pub type ConnId = Uuid;

/// Consecutive overflowing broadcasts before a connection is evicted.
pub const DEFAULT_STALL_LIMIT: u32 = 32;

/// A connection has been accepted for `room_id` on behalf of `session_id`.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub conn_id: ConnId,
    pub room_id: RoomId,
    pub session_id: String,
    pub player_id: PlayerId,
    pub outbox: Outbox,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub conn_id: ConnId,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Dispatch {
    pub conn_id: ConnId,
    pub command: ClientCommand,
}

/// Number of registered connections in a room.
#[derive(Message)]
#[rtype(result = "usize")]
pub struct LiveConnections {
    pub room_id: RoomId,
}

struct LiveConnection {
    session_id: String,
    player_id: PlayerId,
    outbox: Outbox,
    /// Broadcasts since the reader last made room in the outbox.
    stalled: u32,
}

enum RoomOp {
    Register {
        conn_id: ConnId,
        conn: LiveConnection,
    },
    Unregister {
        conn_id: ConnId,
    },
    Command {
        conn_id: ConnId,
        command: ClientCommand,
    },
}

#[derive(Default)]
struct RoomLane {
    members: HashMap<ConnId, LiveConnection>,
    busy: bool,
    pending: VecDeque<RoomOp>,
}

impl RoomLane {
    fn is_idle(&self) -> bool {
        !self.busy && self.pending.is_empty() && self.members.is_empty()
    }
}

enum OpOutcome {
    /// Room changed (or a member came or went): fan out this snapshot.
    Broadcast(Result<RoomSnapshot, DomainError>),
    /// Command refused; only the originator hears about it.
    Rejected {
        outbox: Outbox,
        command: ClientCommand,
        err: DomainError,
    },
    /// Originator left before its command ran.
    Skipped,
}

pub struct Hub {
    store: Arc<dyn Store>,
    room_service: RoomService,
    game_flow: GameFlowService,
    rooms: HashMap<RoomId, RoomLane>,
    conn_rooms: HashMap<ConnId, RoomId>,
    stall_limit: u32,
}

impl Hub {
    pub fn new(store: Arc<dyn Store>, room_service: RoomService, game_flow: GameFlowService) -> Self {
        Self {
            store,
            room_service,
            game_flow,
            rooms: HashMap::new(),
            conn_rooms: HashMap::new(),
            stall_limit: DEFAULT_STALL_LIMIT,
        }
    }

    pub fn with_stall_limit(mut self, limit: u32) -> Self {
        self.stall_limit = limit.max(1);
        self
    }

    fn enqueue(&mut self, room_id: RoomId, op: RoomOp, ctx: &mut Context<Self>) {
        self.rooms
            .entry(room_id.clone())
            .or_default()
            .pending
            .push_back(op);
        self.pump(room_id, ctx);
    }

    /// Start the next queued operation for `room_id` unless one is in flight.
    fn pump(&mut self, room_id: RoomId, ctx: &mut Context<Self>) {
        let Some(lane) = self.rooms.get_mut(&room_id) else {
            return;
        };
        if lane.busy {
            return;
        }
        let Some(op) = lane.pending.pop_front() else {
            if lane.is_idle() {
                self.rooms.remove(&room_id);
                debug!(room_id = %room_id, "[HUB] room lane released");
            }
            return;
        };
        lane.busy = true;

        let store = self.store.clone();
        let fut: LocalBoxFuture<'static, OpOutcome> = match op {
            RoomOp::Register { conn_id, conn } => {
                let player_id = conn.player_id;
                lane.members.insert(conn_id, conn);
                info!(room_id = %room_id, conn_id = %conn_id, player_id, "[HUB] connection registered");
                let room = room_id.clone();
                async move {
                    if let Err(err) = store.set_online(player_id, true).await {
                        warn!(room_id = %room, player_id, error = %err, "[HUB] failed to mark player online");
                    }
                    OpOutcome::Broadcast(store.room_snapshot(&room).await)
                }
                .boxed_local()
            }
            RoomOp::Unregister { conn_id } => {
                let removed = lane.members.remove(&conn_id);
                let room = room_id.clone();
                match removed {
                    Some(conn) => {
                        conn.outbox.close();
                        let player_id = conn.player_id;
                        let still_connected =
                            lane.members.values().any(|m| m.player_id == player_id);
                        info!(room_id = %room_id, conn_id = %conn_id, player_id, "[HUB] connection unregistered");
                        async move {
                            if !still_connected {
                                if let Err(err) = store.set_online(player_id, false).await {
                                    warn!(room_id = %room, player_id, error = %err, "[HUB] failed to mark player offline");
                                }
                            }
                            OpOutcome::Broadcast(store.room_snapshot(&room).await)
                        }
                        .boxed_local()
                    }
                    None => async { OpOutcome::Skipped }.boxed_local(),
                }
            }
            RoomOp::Command { conn_id, command } => match lane.members.get(&conn_id) {
                Some(conn) => {
                    let session_id = conn.session_id.clone();
                    let outbox = conn.outbox.clone();
                    let room_service = self.room_service.clone();
                    let game_flow = self.game_flow.clone();
                    let room = room_id.clone();
                    debug!(room_id = %room_id, conn_id = %conn_id, command = command.name(), "[HUB] dispatching");
                    async move {
                        let applied = apply_command(
                            &room_service,
                            &game_flow,
                            &room,
                            &session_id,
                            &command,
                        )
                        .await;
                        match applied {
                            Ok(()) => OpOutcome::Broadcast(store.room_snapshot(&room).await),
                            Err(err) => OpOutcome::Rejected {
                                outbox,
                                command,
                                err,
                            },
                        }
                    }
                    .boxed_local()
                }
                None => async { OpOutcome::Skipped }.boxed_local(),
            },
        };

        ctx.spawn(fut.into_actor(self).map(move |outcome, hub, ctx| {
            let stalled = hub.finish(&room_id, outcome);
            hub.evict(&room_id, stalled);
            if let Some(lane) = hub.rooms.get_mut(&room_id) {
                lane.busy = false;
            }
            hub.pump(room_id, ctx);
        }));
    }

    /// Deliver the result of one operation; returns connections found stalled.
    fn finish(&mut self, room_id: &str, outcome: OpOutcome) -> Vec<ConnId> {
        match outcome {
            OpOutcome::Broadcast(Ok(snapshot)) => return self.broadcast(room_id, &snapshot),
            OpOutcome::Broadcast(Err(err)) => {
                error!(room_id, error = %err, "[HUB] failed to load room snapshot");
            }
            OpOutcome::Rejected {
                outbox,
                command,
                err,
            } => {
                let message = if err.is_user_facing() {
                    debug!(room_id, command = command.name(), error = %err, "[HUB] command rejected");
                    err.detail().to_string()
                } else {
                    error!(room_id, command = command.name(), error = %err, "[HUB] command failed");
                    command.failure_message().to_string()
                };
                outbox.push(ServerMsg::error(message));
            }
            OpOutcome::Skipped => {}
        }
        Vec::new()
    }

    /// Push one projection of `snapshot` to each live connection of the room.
    fn broadcast(&mut self, room_id: &str, snapshot: &RoomSnapshot) -> Vec<ConnId> {
        let stall_limit = self.stall_limit;
        let Some(lane) = self.rooms.get_mut(room_id) else {
            return Vec::new();
        };
        let mut stalled = Vec::new();
        for (conn_id, conn) in lane.members.iter_mut() {
            let state = view::project_for_session(snapshot, &conn.session_id);
            match conn.outbox.push(ServerMsg::RoomState { state }) {
                PushOutcome::Accepted => conn.stalled = 0,
                PushOutcome::DroppedOldest => {
                    conn.stalled += 1;
                    debug!(room_id, conn_id = %conn_id, stalled = conn.stalled, "[HUB] outbox full, dropped oldest frame");
                    if conn.stalled >= stall_limit {
                        stalled.push(*conn_id);
                    }
                }
                PushOutcome::Closed => {
                    debug!(room_id, conn_id = %conn_id, "[HUB] outbox already closed");
                }
            }
        }
        stalled
    }

    /// Close the outboxes of stalled connections and queue their unregistration.
    fn evict(&mut self, room_id: &str, stalled: Vec<ConnId>) {
        if stalled.is_empty() {
            return;
        }
        let Some(lane) = self.rooms.get_mut(room_id) else {
            return;
        };
        for conn_id in stalled {
            // a Disconnect already on its way queued the unregistration
            if self.conn_rooms.remove(&conn_id).is_none() {
                continue;
            }
            if let Some(conn) = lane.members.get(&conn_id) {
                warn!(room_id, conn_id = %conn_id, player_id = conn.player_id, "[HUB] evicting stalled connection");
                conn.outbox.close();
            }
            lane.pending.push_back(RoomOp::Unregister { conn_id });
        }
    }
}

/// Re-resolve the acting player and run one command against the room.
async fn apply_command(
    room_service: &RoomService,
    game_flow: &GameFlowService,
    room_id: &str,
    session_id: &str,
    command: &ClientCommand,
) -> Result<(), DomainError> {
    let player = room_service.require_player(session_id, room_id).await?;
    match command {
        ClientCommand::JoinTeam { team, role } => {
            room_service.join_team(&player, *team, *role).await
        }
        ClientCommand::SetRole { role } => room_service.set_role(&player, *role).await,
        ClientCommand::StartGame => game_flow.start_game(room_id).await.map(|_| ()),
        ClientCommand::GiveClue { clue, number } => game_flow
            .give_clue(&player, clue, *number)
            .await
            .map(|_| ()),
        ClientCommand::GuessCard { card_id } => {
            game_flow.guess_card(&player, *card_id).await.map(|_| ())
        }
        ClientCommand::EndGuessing => game_flow.end_guessing(&player).await.map(|_| ()),
        ClientCommand::NewGame => room_service.reset_roles(room_id).await,
    }
}

impl Actor for Hub {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[HUB] started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        for lane in self.rooms.values() {
            for conn in lane.members.values() {
                conn.outbox.close();
            }
        }
        info!("[HUB] stopped");
    }
}

impl Handler<Connect> for Hub {
    type Result = ();

    fn handle(&mut self, msg: Connect, ctx: &mut Self::Context) -> Self::Result {
        if self.conn_rooms.contains_key(&msg.conn_id) {
            warn!(conn_id = %msg.conn_id, "[HUB] duplicate connect ignored");
            return;
        }
        self.conn_rooms.insert(msg.conn_id, msg.room_id.clone());
        let op = RoomOp::Register {
            conn_id: msg.conn_id,
            conn: LiveConnection {
                session_id: msg.session_id,
                player_id: msg.player_id,
                outbox: msg.outbox,
                stalled: 0,
            },
        };
        self.enqueue(msg.room_id, op, ctx);
    }
}

impl Handler<Disconnect> for Hub {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, ctx: &mut Self::Context) -> Self::Result {
        let Some(room_id) = self.conn_rooms.remove(&msg.conn_id) else {
            return;
        };
        self.enqueue(room_id, RoomOp::Unregister { conn_id: msg.conn_id }, ctx);
    }
}

impl Handler<Dispatch> for Hub {
    type Result = ();

    fn handle(&mut self, msg: Dispatch, ctx: &mut Self::Context) -> Self::Result {
        let Some(room_id) = self.conn_rooms.get(&msg.conn_id).cloned() else {
            debug!(conn_id = %msg.conn_id, "[HUB] command from unknown connection dropped");
            return;
        };
        let op = RoomOp::Command {
            conn_id: msg.conn_id,
            command: msg.command,
        };
        self.enqueue(room_id, op, ctx);
    }
}

impl Handler<LiveConnections> for Hub {
    type Result = MessageResult<LiveConnections>;

    fn handle(&mut self, msg: LiveConnections, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(
            self.rooms
                .get(&msg.room_id)
                .map(|lane| lane.members.len())
                .unwrap_or(0),
        )
    }
}
