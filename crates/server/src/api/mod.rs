//! API handlers, grouped by concern:
//! - `health`: liveness and effective config
//! - `evaluate`: thresholds and the three evaluation entry points
//! - `scenarios`: synthetic scenario listing and evaluation
//! - `types`: request/response shapes
//! - `doc`: OpenAPI aggregation

pub mod doc;
pub mod evaluate;
pub mod health;
pub mod scenarios;
pub mod types;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use self::types::ErrorResponse;

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            fields: Vec::new(),
        }),
    )
}

/// Unwrap a JSON body, reporting extractor rejections as an [`ErrorResponse`].
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        debug!(status = %rejection.status(), "request body rejected");
        api_error(rejection.status(), rejection.body_text())
    })
}
