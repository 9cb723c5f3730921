use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{RoomCode, SessionId};
use crate::state::AppState;
use crate::ws::{Outbox, WsSession};

#[derive(Debug, Deserialize)]
struct UpgradeQuery {
    #[serde(default)]
    session_id: Option<String>,
}

/// GET /ws/{room_id}?session_id=...
///
/// The player must already exist for (session, room); the upgrade is refused
/// with 404 otherwise.
async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    room: RoomCode,
    query: web::Query<UpgradeQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = SessionId::parse(query.session_id.as_deref())?;
    let player = app_state
        .rooms()
        .require_player(&session.0, &room.0)
        .await
        .map_err(AppError::from)?;

    let conn_id = Uuid::new_v4();
    info!(conn_id = %conn_id, room_id = %room.0, player_id = player.id, "WebSocket upgrade");

    let session = WsSession::new(
        conn_id,
        room.0,
        session.0,
        player.id,
        app_state.hub().clone(),
        Outbox::new(app_state.outbox_capacity()),
    );
    ws::start(session, &req, stream)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{room_id}").route(web::get().to(upgrade)));
}
