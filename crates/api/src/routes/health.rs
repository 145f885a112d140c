use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when a dependency is unavailable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// The media root exists and is a directory, so uploads can land.
    pub media_ready: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = bns_db::health_check(&state.pool).await.is_ok();
    let media_ready = tokio::fs::metadata(&state.config.media_root)
        .await
        .is_ok_and(|meta| meta.is_dir());

    let status = if db_healthy && media_ready { "ok" } else { "degraded" };
    if status != "ok" {
        tracing::warn!(db_healthy, media_ready, "Health check degraded");
    }

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        media_ready,
    })
}

/// Mounted at the root, outside `/api/v1` and its dashboard rendering.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
