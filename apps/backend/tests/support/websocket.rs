// WebSocket test server

use std::net::TcpListener;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::routes;
use backend::state::AppState;
use backend::ws::LiveConnections;

/// Real HTTP server on an ephemeral port, so tokio-tungstenite clients can
/// connect. Returns the stop handle, bound address and server task.
pub async fn start_test_server(
    state: AppState,
) -> Result<
    (
        actix_web::dev::ServerHandle,
        std::net::SocketAddr,
        tokio::task::JoinHandle<Result<(), std::io::Error>>,
    ),
    Box<dyn std::error::Error>,
> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let handle = server.handle();
    let join = tokio::spawn(server);
    Ok((handle, addr, join))
}

pub async fn wait_for_connections(
    state: &AppState,
    room_id: &str,
    expected: usize,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = tokio::time::Instant::now();
    loop {
        let live = state
            .hub()
            .send(LiveConnections {
                room_id: room_id.to_string(),
            })
            .await?;
        if live == expected {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(format!("timeout waiting for {expected} live connections (got {live})").into());
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
