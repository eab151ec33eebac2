//! Synthetic scenarios, generated and evaluated on request.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tracing::debug;

use adpulse_ingest::synthetic::generate_seeded;
use adpulse_ingest::Scenario;

use crate::state::AppState;

use super::evaluate::run;
use super::types::{ErrorResponse, EvaluationReport, ScenarioParams, ScenarioSummary};
use super::{api_error, ApiError};

#[utoipa::path(
    get,
    path = "/scenarios",
    tag = "Scenarios",
    responses(
        (status = 200, description = "Available scenarios", body = Vec<ScenarioSummary>)
    )
)]
pub async fn list_scenarios() -> Json<Vec<ScenarioSummary>> {
    Json(
        Scenario::ALL
            .into_iter()
            .map(|s| ScenarioSummary {
                name: s.name().to_string(),
                label: s.label().to_string(),
                target_rule: s.target_rule().map(|r| r.to_string()),
            })
            .collect(),
    )
}

#[utoipa::path(
    get,
    path = "/scenarios/{name}/evaluate",
    tag = "Scenarios",
    params(
        ("name" = String, Path, description = "Scenario name, e.g. cost-spike"),
        ScenarioParams
    ),
    responses(
        (status = 200, description = "Report for a generated day", body = EvaluationReport),
        (status = 400, description = "Invalid seed", body = ErrorResponse),
        (status = 404, description = "Unknown scenario", body = ErrorResponse)
    )
)]
pub async fn evaluate_scenario(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    params: Result<Query<ScenarioParams>, QueryRejection>,
) -> Result<Json<EvaluationReport>, ApiError> {
    let Query(params) =
        params.map_err(|rejection| api_error(rejection.status(), rejection.body_text()))?;
    let scenario: Scenario = name
        .parse()
        .map_err(|e: String| api_error(StatusCode::NOT_FOUND, e))?;
    let seed = params.seed.unwrap_or_else(rand::random);
    debug!(%scenario, seed, "generating scenario rows");

    let rows = generate_seeded(scenario, Utc::now(), seed);
    let built = state
        .builder
        .build(&rows)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;
    run(&state, built.bundle, Some(built.live)).map(Json)
}
