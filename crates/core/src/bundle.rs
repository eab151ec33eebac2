//! The metrics bundle: the fixed-shape input consumed by the rule engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Aggregated campaign metrics for one evaluation.
///
/// Produced by a bundle builder (aggregated rows, manual form, synthetic
/// scenario) and consumed read-only by the rule engine. Every field is
/// required; a JSON body missing any of them fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsBundle {
    /// Spend summed over the most recent 4-hour window.
    pub spend_last_4h: f64,
    /// Conversions summed over the same window.
    pub conversions_last_4h: u64,
    /// Total spend for the evaluation period (day).
    pub daily_spend: f64,
    /// Configured budget ceiling for the period. Must be strictly positive.
    pub daily_budget: f64,
    /// Most recent cost per thousand impressions.
    pub current_cpm: f64,
    /// Baseline CPM for comparison.
    pub average_cpm: f64,
    /// Most recent click-through rate, in percent.
    pub current_ctr: f64,
    /// Baseline CTR for comparison, in percent.
    pub average_ctr: f64,
}

/// Reasons a bundle is rejected before evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BundleError {
    #[error("field `{field}` must be a finite number")]
    NonFinite { field: &'static str },

    #[error("field `{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("field `daily_budget` must be greater than zero (got {0})")]
    NonPositiveBudget(f64),
}

impl BundleError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            BundleError::NonFinite { field } | BundleError::Negative { field, .. } => field,
            BundleError::NonPositiveBudget(_) => "daily_budget",
        }
    }
}

impl MetricsBundle {
    /// The floating-point fields paired with their wire names, in declaration order.
    pub fn float_fields(&self) -> [(&'static str, f64); 7] {
        [
            ("spend_last_4h", self.spend_last_4h),
            ("daily_spend", self.daily_spend),
            ("daily_budget", self.daily_budget),
            ("current_cpm", self.current_cpm),
            ("average_cpm", self.average_cpm),
            ("current_ctr", self.current_ctr),
            ("average_ctr", self.average_ctr),
        ]
    }

    /// Check that every value is finite and non-negative and that the budget
    /// is strictly positive. Zero baselines are accepted.
    pub fn validate(&self) -> Result<(), BundleError> {
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(BundleError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(BundleError::Negative { field, value });
            }
        }
        if self.daily_budget <= 0.0 {
            return Err(BundleError::NonPositiveBudget(self.daily_budget));
        }
        Ok(())
    }
}
