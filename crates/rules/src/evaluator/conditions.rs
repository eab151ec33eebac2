//! Trigger conditions, one per rule.
//!
//! Comparisons are literal: no special-casing of zero baselines. A zero
//! `average_cpm` fires Rule C for any positive CPM; a zero `average_ctr`
//! can never fire Rule D.

use adpulse_core::{MetricsBundle, RuleId};

use crate::thresholds::RuleThresholds;

/// Observed value and the line it is compared against.
pub(super) fn observation(
    rule: RuleId,
    bundle: &MetricsBundle,
    thresholds: &RuleThresholds,
) -> (f64, f64) {
    match rule {
        RuleId::A => (bundle.spend_last_4h, thresholds.zero_conversion_spend_floor),
        RuleId::B => (bundle.daily_spend, thresholds.budget_limit(bundle.daily_budget)),
        RuleId::C => (bundle.current_cpm, thresholds.cpm_ceiling(bundle.average_cpm)),
        RuleId::D => (bundle.current_ctr, thresholds.ctr_floor(bundle.average_ctr)),
    }
}

pub(super) fn fires(rule: RuleId, bundle: &MetricsBundle, thresholds: &RuleThresholds) -> bool {
    let (observed, threshold) = observation(rule, bundle, thresholds);
    match rule {
        RuleId::A => observed > threshold && bundle.conversions_last_4h == 0,
        RuleId::B | RuleId::C => observed > threshold,
        RuleId::D => observed < threshold,
    }
}
