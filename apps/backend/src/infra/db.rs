use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::adapters::SeaStore;
use crate::config::{AppConfig, StoreKind};
use crate::error::AppError;
use crate::repos::{MemoryStore, Store};

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

/// Strip credentials from a database URL before it reaches the logs.
pub fn sanitize_db_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

/// Retry a connection attempt with fixed interval delays.
/// Returns the error of the last attempt once all attempts are used.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(e) => {
                warn!(
                    attempt,
                    max_attempts,
                    interval_ms,
                    error = %e,
                    "connection_retry=failed"
                );
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Connect and bring the schema up to date.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let started = Instant::now();
    let safe_url = sanitize_db_url(url);

    let mut opts = ConnectOptions::new(url.to_string());
    opts.connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if url.starts_with("sqlite:") {
        // a single writer avoids SQLITE_BUSY between pooled connections
        opts.max_connections(1);
    }

    let conn = retry_connection(
        || {
            let opts = opts.clone();
            async move { Database::connect(opts).await.map_err(AppError::from) }
        },
        CONNECT_ATTEMPTS,
        CONNECT_RETRY_INTERVAL_MS,
    )
    .await?;

    migration::migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("database migration failed: {e}")))?;

    info!(
        db_url = %safe_url,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Database ready"
    );
    Ok(conn)
}

/// Build the `Store` selected by configuration.
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn Store>, AppError> {
    match (config.store, config.database_url.as_deref()) {
        (StoreKind::Memory, _) => {
            warn!("Using in-memory store; state is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        (kind, Some(url)) => {
            info!(store = %kind, "Connecting store");
            let conn = connect_db(url).await?;
            Ok(Arc::new(SeaStore::new(conn)))
        }
        (kind, None) => Err(AppError::config(format!(
            "store '{kind}' requires DATABASE_URL"
        ))),
    }
}
