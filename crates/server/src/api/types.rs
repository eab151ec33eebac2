//! Request/response types for the evaluation API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use adpulse_core::{Alert, MetricRecord, MetricsBundle};
use adpulse_ingest::{FieldError, LiveMetrics};
use adpulse_rules::RuleCheck;

// ── Responses ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Nominal,
    Anomalies,
}

/// Outcome of one evaluation, alerts first-to-last in rule order.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EvaluationReport {
    pub evaluation_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub status: ReportStatus,
    pub alert_count: usize,
    #[schema(value_type = Vec<Object>)]
    pub alerts: Vec<Alert>,
    #[schema(value_type = Vec<Object>)]
    pub evidence: Vec<RuleCheck>,
    #[schema(value_type = Object)]
    pub bundle: MetricsBundle,
    /// Latest-interval snapshot, present when built from rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub live: Option<LiveMetrics>,
}

impl EvaluationReport {
    pub fn new(
        bundle: MetricsBundle,
        alerts: Vec<Alert>,
        evidence: Vec<RuleCheck>,
        live: Option<LiveMetrics>,
    ) -> Self {
        let status = if alerts.is_empty() {
            ReportStatus::Nominal
        } else {
            ReportStatus::Anomalies
        };
        Self {
            evaluation_id: Uuid::new_v4(),
            evaluated_at: Utc::now(),
            status,
            alert_count: alerts.len(),
            alerts,
            evidence,
            bundle,
            live,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Per-field problems for form submissions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<Object>)]
    pub fields: Vec<FieldError>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub profile: String,
}

/// One entry of GET /scenarios.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScenarioSummary {
    pub name: String,
    pub label: String,
    /// Rule the scenario is built to trip, if any.
    pub target_rule: Option<String>,
}

// ── Requests ────────────────────────────────────────────────────────

/// Body of POST /evaluate/rows.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RowsRequest {
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<MetricRecord>,
    /// Falls back to the configured daily budget.
    #[serde(default)]
    pub daily_budget: Option<f64>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScenarioParams {
    /// RNG seed; random when omitted.
    pub seed: Option<u64>,
}
