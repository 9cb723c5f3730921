//! Adapters for external dependencies.
//!
//! `*_sea` modules are thin sea-orm functions generic over `ConnectionTrait`
//! so they run against a pool or a transaction alike. They return `DbErr`;
//! `SeaStore` maps to `DomainError` via `From<DbErr>`.

pub mod cards_sea;
pub mod convert;
pub mod games_sea;
pub mod players_sea;
pub mod rooms_sea;
pub mod sea_store;

pub use sea_store::SeaStore;
