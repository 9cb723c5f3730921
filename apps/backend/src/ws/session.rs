use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web_actors::ws;
use tracing::{debug, info, warn};

use crate::domain::{PlayerId, RoomId};
use crate::ws::hub::{ConnId, Connect, Disconnect, Dispatch, Hub};
use crate::ws::outbox::Outbox;
use crate::ws::protocol::{self, ProtocolError, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// One live WebSocket.
///
/// Inbound text frames are decoded and forwarded to the hub; the outbox is
/// drained as a second stream on the same context, so frames reach the
/// socket in the order the hub queued them. The hub closing the outbox ends
/// that stream and stops the session.
pub struct WsSession {
    conn_id: ConnId,
    room_id: RoomId,
    session_id: String,
    player_id: PlayerId,
    hub: Addr<Hub>,
    outbox: Option<Outbox>,
    last_heartbeat: Instant,
}

impl WsSession {
    pub fn new(
        conn_id: ConnId,
        room_id: RoomId,
        session_id: String,
        player_id: PlayerId,
        hub: Addr<Hub>,
        outbox: Outbox,
    ) -> Self {
        Self {
            conn_id,
            room_id,
            session_id,
            player_id,
            hub,
            outbox: Some(outbox),
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn reject(&self, ctx: &mut ws::WebsocketContext<Self>, err: ProtocolError) {
        debug!(
            conn_id = %self.conn_id,
            room_id = %self.room_id,
            error = %err,
            "[WS SESSION] rejected inbound frame"
        );
        Self::send_json(ctx, &ServerMsg::error(err.to_string()));
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    room_id = %actor.room_id,
                    player_id = actor.player_id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            room_id = %self.room_id,
            player_id = self.player_id,
            "[WS SESSION] started"
        );

        if let Some(outbox) = self.outbox.take() {
            ctx.add_stream(outbox.clone().into_stream());
            self.hub.do_send(Connect {
                conn_id: self.conn_id,
                room_id: self.room_id.clone(),
                session_id: self.session_id.clone(),
                player_id: self.player_id,
                outbox,
            });
        }

        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.hub.do_send(Disconnect {
            conn_id: self.conn_id,
        });
        info!(
            conn_id = %self.conn_id,
            room_id = %self.room_id,
            player_id = self.player_id,
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match protocol::decode(&text) {
                    Ok(command) => self.hub.do_send(Dispatch {
                        conn_id: self.conn_id,
                        command,
                    }),
                    Err(err) => self.reject(ctx, err),
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.reject(ctx, ProtocolError::Binary);
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    room_id = %self.room_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl StreamHandler<ServerMsg> for WsSession {
    fn handle(&mut self, msg: ServerMsg, ctx: &mut Self::Context) {
        Self::send_json(ctx, &msg);
    }

    fn finished(&mut self, ctx: &mut Self::Context) {
        debug!(conn_id = %self.conn_id, "[WS SESSION] outbox closed");
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
        ctx.stop();
    }
}
