use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// JSON body extractor whose failures come back as problem+json 400s
/// instead of actix's plain-text defaults.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        // read before the future so the request is not borrowed across await
        let is_json = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false);
        let body = web::Bytes::from_request(req, payload);

        Box::pin(async move {
            if !is_json {
                return Err(AppError::bad_request(
                    ErrorCode::BadRequest,
                    "Content-Type must be application/json",
                ));
            }
            let bytes = body.await.map_err(|e| {
                AppError::bad_request(ErrorCode::BadRequest, format!("Failed to read body: {e}"))
            })?;
            serde_json::from_slice::<T>(&bytes)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(error = %e, "Rejected JSON body");
                    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON: {e}"))
                })
        })
    }
}
