//! OpenAPI documentation, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "adpulse API",
        version = "0.1.0",
        description = "Threshold rules over ad-campaign metrics: kill-switch and trend alerts.",
    ),
    tags(
        (name = "Health", description = "Liveness and effective configuration"),
        (name = "Rules", description = "Active rule thresholds"),
        (name = "Evaluate", description = "Evaluate a bundle, a form submission, or raw rows"),
        (name = "Scenarios", description = "Synthetic failure scenarios"),
    ),
    paths(
        crate::api::health::health,
        crate::api::health::config,
        crate::api::evaluate::thresholds,
        crate::api::evaluate::evaluate_bundle,
        crate::api::evaluate::evaluate_form,
        crate::api::evaluate::evaluate_rows,
        crate::api::scenarios::list_scenarios,
        crate::api::scenarios::evaluate_scenario,
    ),
    components(schemas(
        crate::api::types::EvaluationReport,
        crate::api::types::ReportStatus,
        crate::api::types::ErrorResponse,
        crate::api::types::HealthResponse,
        crate::api::types::ScenarioSummary,
        crate::api::types::RowsRequest,
    ))
)]
pub struct ApiDoc;
