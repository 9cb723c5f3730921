//! Process configuration read from the environment.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::ws::{DEFAULT_OUTBOX_CAPACITY, DEFAULT_STALL_LIMIT};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SQLITE_URL: &str = "sqlite://codenames.db?mode=rwc";

/// Which `Store` implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Sqlite,
    Memory,
}

impl FromStr for StoreKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "sqlite" => Ok(StoreKind::Sqlite),
            "memory" => Ok(StoreKind::Memory),
            other => Err(AppError::config(format!(
                "STORE must be one of postgres, sqlite, memory (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreKind::Postgres => "postgres",
            StoreKind::Sqlite => "sqlite",
            StoreKind::Memory => "memory",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
    /// `None` only for the in-memory store.
    pub database_url: Option<String>,
    pub outbox_capacity: usize,
    pub stall_limit: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a port number (got '{raw}')"))
            })?,
            None => DEFAULT_PORT,
        };

        let store = match var("STORE") {
            Some(raw) => raw.parse()?,
            None => StoreKind::Postgres,
        };
        let database_url = match store {
            StoreKind::Memory => None,
            StoreKind::Sqlite => {
                Some(var("DATABASE_URL").unwrap_or_else(|| DEFAULT_SQLITE_URL.to_string()))
            }
            StoreKind::Postgres => Some(var("DATABASE_URL").ok_or_else(|| {
                AppError::config("Required environment variable 'DATABASE_URL' is not set")
            })?),
        };

        let outbox_capacity = match var("WS_OUTBOX_CAPACITY") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(AppError::config(format!(
                        "WS_OUTBOX_CAPACITY must be a positive integer (got '{raw}')"
                    )))
                }
            },
            None => DEFAULT_OUTBOX_CAPACITY,
        };

        let stall_limit = match var("WS_STALL_LIMIT") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(AppError::config(format!(
                        "WS_STALL_LIMIT must be a positive integer (got '{raw}')"
                    )))
                }
            },
            None => DEFAULT_STALL_LIMIT,
        };

        Ok(Self {
            host,
            port,
            store,
            database_url,
            outbox_capacity,
            stall_limit,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
