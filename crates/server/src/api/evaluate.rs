//! Evaluation endpoints: a ready bundle, a form submission, or raw rows.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, warn};

use adpulse_core::MetricsBundle;
use adpulse_ingest::{BundleForm, LiveMetrics};
use adpulse_rules::RuleThresholds;

use crate::state::AppState;

use super::types::{ErrorResponse, EvaluationReport, RowsRequest};
use super::{api_error, json_body, ApiError};

/// Run the engine and wrap the outcome in a report.
pub(crate) fn run(
    state: &AppState,
    bundle: MetricsBundle,
    live: Option<LiveMetrics>,
) -> Result<EvaluationReport, ApiError> {
    let alerts = state
        .engine
        .evaluate(&bundle)
        .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e))?;
    let evidence = state.engine.evidence(&bundle);
    let report = EvaluationReport::new(bundle, alerts, evidence, live);
    info!(
        evaluation_id = %report.evaluation_id,
        alert_count = report.alert_count,
        "bundle evaluated"
    );
    Ok(report)
}

#[utoipa::path(
    get,
    path = "/thresholds",
    tag = "Rules",
    responses(
        (status = 200, description = "Active rule thresholds", body = Object)
    )
)]
pub async fn thresholds(State(state): State<Arc<AppState>>) -> Json<RuleThresholds> {
    Json(*state.engine.thresholds())
}

#[utoipa::path(
    post,
    path = "/evaluate",
    tag = "Evaluate",
    request_body(content = Object, description = "Metrics bundle"),
    responses(
        (status = 200, description = "Evaluation report", body = EvaluationReport),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 422, description = "Missing field or invalid bundle", body = ErrorResponse)
    )
)]
pub async fn evaluate_bundle(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MetricsBundle>, JsonRejection>,
) -> Result<Json<EvaluationReport>, ApiError> {
    let bundle = json_body(body)?;
    run(&state, bundle, None).map(Json)
}

#[utoipa::path(
    post,
    path = "/evaluate/form",
    tag = "Evaluate",
    request_body(content = Object, description = "Form fields; any may be missing"),
    responses(
        (status = 200, description = "Evaluation report", body = EvaluationReport),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 422, description = "Field errors", body = ErrorResponse)
    )
)]
pub async fn evaluate_form(
    State(state): State<Arc<AppState>>,
    body: Result<Json<BundleForm>, JsonRejection>,
) -> Result<Json<EvaluationReport>, ApiError> {
    let bundle = json_body(body)?.into_bundle().map_err(|errors| {
        warn!(%errors, "form rejected");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "form has invalid fields".to_string(),
                fields: errors.errors,
            }),
        )
    })?;
    run(&state, bundle, None).map(Json)
}

#[utoipa::path(
    post,
    path = "/evaluate/rows",
    tag = "Evaluate",
    request_body = RowsRequest,
    responses(
        (status = 200, description = "Report with live metrics", body = EvaluationReport),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 422, description = "Rows could not be aggregated", body = ErrorResponse)
    )
)]
pub async fn evaluate_rows(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RowsRequest>, JsonRejection>,
) -> Result<Json<EvaluationReport>, ApiError> {
    let req = json_body(body)?;
    let builder = match req.daily_budget {
        Some(budget) => state.builder.with_budget(budget),
        None => state.builder.clone(),
    };
    let built = builder
        .build(&req.rows)
        .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e))?;
    run(&state, built.bundle, Some(built.live)).map(Json)
}
