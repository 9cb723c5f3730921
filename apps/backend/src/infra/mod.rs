//! Infrastructure: store bootstrap for the configured backend.

pub mod db;

pub use db::{build_store, connect_db};
