use actix_web::web;

pub mod health;
pub mod players;
pub mod realtime;
pub mod rooms;

/// Register every route; shared by `main.rs` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Room routes: /api/rooms/**
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));

    // Player routes: /api/players
    cfg.service(web::scope("/api/players").configure(players::configure_routes));

    // Realtime routes: /ws/{room_id}
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
