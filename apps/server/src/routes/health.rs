//! Health check.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use salesdesk_core::dto::HealthResponse;

use crate::state::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let database_ok = state.db.health_check().await;
    Json(HealthResponse {
        status: if database_ok { "ok" } else { "degraded" }.to_string(),
        database: if database_ok { "ok" } else { "unavailable" }.to_string(),
    })
}
