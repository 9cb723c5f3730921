use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// GET /health
///
/// 200 once the store answers; the store's failure otherwise (503 when the
/// database is unreachable).
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    app_state.store().health_check().await?;
    Ok(HttpResponse::Ok().json(HealthResponse { status: "ok" }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(health)));
}
