use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{SessionId, ValidatedJson};
use crate::state::AppState;
use crate::utils::room_code::normalize_room_code;

#[derive(Debug, Deserialize)]
struct JoinRequest {
    #[serde(default)]
    room_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// POST /api/players
///
/// Joins (or renames) the caller's player in a room. The player is keyed by
/// the `X-Session-ID` header, so repeating the call is idempotent.
async fn join_room(
    session: SessionId,
    body: ValidatedJson<JoinRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let raw_room = body
        .room_id
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::bad_request(ErrorCode::BadRequest, "room_id is required"))?;
    let room_id = normalize_room_code(&raw_room)
        .ok_or_else(|| AppError::not_found(ErrorCode::RoomNotFound, "room not found"))?;

    let player = app_state
        .rooms()
        .join_room(&room_id, &session.0, body.name.as_deref().unwrap_or_default())
        .await?;
    Ok(HttpResponse::Created().json(player))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(join_room)));
}
