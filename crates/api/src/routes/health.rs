use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether both resource files can currently be loaded.
    pub stores_healthy: bool,
}

/// GET /health -- returns service and store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let characters = lorebook_db::health_check(state.characters.as_ref()).await;
    let places = lorebook_db::health_check(state.places.as_ref()).await;

    for (store, result) in [("characters", &characters), ("places", &places)] {
        if let Err(err) = result {
            tracing::warn!(store, error = %err, "Store health check failed");
        }
    }

    let stores_healthy = characters.is_ok() && places.is_ok();
    let status = if stores_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        stores_healthy,
    })
}

/// Mount health check routes (intended for root level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
