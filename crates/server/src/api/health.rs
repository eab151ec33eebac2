//! Liveness and effective configuration.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::state::AppState;

use super::types::HealthResponse;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        profile: state.config.profile_label().to_string(),
    })
}

/// Effective configuration after profile resolution.
#[utoipa::path(
    get,
    path = "/config",
    tag = "Health",
    responses(
        (status = 200, description = "Effective configuration", body = Object)
    )
)]
pub async fn config(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(state.config.redacted_summary())
}
