use std::time::Duration;

use actix_web::{web, App, HttpServer};
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::{build_state, build_store, routes, AppConfig};
use tracing::{error, info};

mod telemetry;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let store = match build_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, store = %config.store, "Failed to initialize store");
            std::process::exit(1);
        }
    };

    let app_state = build_state()
        .with_store(store)
        .with_outbox_capacity(config.outbox_capacity)
        .with_stall_limit(config.stall_limit)
        .build();
    let data = web::Data::new(app_state);

    let (host, port) = config.bind_addr();
    info!(%host, port, store = %config.store, outbox_capacity = config.outbox_capacity, "Starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .shutdown_timeout(SHUTDOWN_TIMEOUT.as_secs())
    .bind((host.as_str(), port))?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
