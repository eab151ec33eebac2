//! HTTP router construction.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            warn!(origin, "invalid CORS origin, allowing any");
            CorsLayer::permissive()
        }
    }
}

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/health", get(api::health::health))
        .route("/config", get(api::health::config))
        .route("/thresholds", get(api::evaluate::thresholds))
        .route("/evaluate", post(api::evaluate::evaluate_bundle))
        .route("/evaluate/form", post(api::evaluate::evaluate_form))
        .route("/evaluate/rows", post(api::evaluate::evaluate_rows))
        .route("/scenarios", get(api::scenarios::list_scenarios))
        .route(
            "/scenarios/{name}/evaluate",
            get(api::scenarios::evaluate_scenario),
        )
        .layer(cors)
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}
