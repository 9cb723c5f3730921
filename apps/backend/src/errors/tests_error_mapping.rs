// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use actix_web::ResponseError;

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let de = DomainError::validation(ValidationKind::OutOfTurn, "not your team's turn");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::OutOfTurn);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_missing_field_to_400() {
    let de = DomainError::validation(ValidationKind::MissingField, "name is required");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::BadRequest);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Room, "room not found");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "ROOM_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let other = DomainError::not_found(NotFoundKind::Other("x".into()), "gone");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::NotFound);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let other = DomainError::infra(InfraErrorKind::Other("db".into()), "boom");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::DbError);
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn maps_config() {
    let app: AppError = DomainError::config("word list too short").into();
    assert_eq!(app.code(), ErrorCode::ConfigError);
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn problem_details_response_shape() {
    let app = AppError::not_found(ErrorCode::RoomNotFound, "room not found");
    let resp = app.error_response();
    assert_eq!(resp.status().as_u16(), 404);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert_eq!(ct, "application/problem+json");
    assert!(resp.headers().contains_key("x-trace-id"));
}

#[test]
fn detail_strips_kind_prefix() {
    let de = DomainError::validation(ValidationKind::CardRevealed, "card already revealed");
    assert_eq!(de.detail(), "card already revealed");
    assert!(de.is_user_facing());
    assert!(!DomainError::infra(InfraErrorKind::Timeout, "t").is_user_facing());
}
