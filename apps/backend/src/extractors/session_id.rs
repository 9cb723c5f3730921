use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub const SESSION_HEADER: &str = "X-Session-ID";

/// Opaque client session identifier taken from the `X-Session-ID` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(SessionId(id.to_string())),
            _ => Err(AppError::bad_request(
                ErrorCode::MissingSessionId,
                "session id is required",
            )),
        }
    }
}

impl FromRequest for SessionId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok());
        ready(SessionId::parse(raw))
    }
}
