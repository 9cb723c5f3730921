//! Domain-level error type used across the engine, stores, and the hub.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert via `From<DomainError>`;
//! the hub turns it into a private `error` frame for the originating connection.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use sea_orm::DbErr;

/// Business-rule violations raised by the engine and the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    PhaseMismatch,
    ClueAlreadyGiven,
    EmptyClue,
    NegativeNumber,
    NoActiveClue,
    OutOfTurn,
    NoGuessesLeft,
    CardRevealed,
    TeamComposition,
    InvalidTeam,
    InvalidRole,
    NotSpymaster,
    NotOperative,
    MissingField,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Room,
    Player,
    Game,
    Card,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
    /// Misconfiguration detected at runtime (e.g. a word list that is too short)
    Config(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
            DomainError::Config(d) => write!(f, "config: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    /// Human-readable detail without the kind prefix.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::NotFound(_, d)
            | DomainError::Infra(_, d)
            | DomainError::Config(d) => d,
        }
    }

    /// True for failures caused by the caller's input rather than by the system.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(..) | DomainError::NotFound(..)
        )
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e {
            DbErr::RecordNotFound(d) => DomainError::not_found(NotFoundKind::Other("record".into()), d),
            DbErr::ConnectionAcquire(err) => {
                DomainError::infra(InfraErrorKind::DbUnavailable, err.to_string())
            }
            DbErr::Conn(err) => DomainError::infra(InfraErrorKind::DbUnavailable, err.to_string()),
            other => DomainError::infra(InfraErrorKind::Other("db".into()), other.to_string()),
        }
    }
}
