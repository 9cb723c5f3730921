use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::utils::room_code::normalize_room_code;

/// Room code from the `{room_id}` path segment, normalized to upper case.
///
/// A segment that cannot be a room code is reported the same way as an
/// unknown room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCode(pub String);

impl FromRequest for RoomCode {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let code = req
            .match_info()
            .get("room_id")
            .and_then(normalize_room_code)
            .map(RoomCode)
            .ok_or_else(|| AppError::not_found(ErrorCode::RoomNotFound, "room not found"));
        ready(code)
    }
}
