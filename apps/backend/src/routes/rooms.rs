//! Room HTTP routes.

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::RoomCode;
use crate::state::AppState;

/// POST /api/rooms
async fn create_room(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let room = app_state.rooms().create_room().await?;
    Ok(HttpResponse::Created().json(room))
}

/// GET /api/rooms/{room_id}
///
/// Public view: card types stay hidden until revealed or the game is over.
async fn get_room(
    room: RoomCode,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let state = app_state.rooms().room_state(&room.0).await?;
    Ok(HttpResponse::Ok().json(state))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_room)));
    cfg.service(web::resource("/{room_id}").route(web::get().to(get_room)));
}
