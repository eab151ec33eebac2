//! Named rule constants.

use serde::{Deserialize, Serialize};

use adpulse_core::config::ThresholdOverrides;

use crate::loader::{Result, RuleError};

/// Tunable constants for the four rules.
///
/// Changing these never changes rule semantics, only where the lines sit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleThresholds {
    /// Rule B: fraction of the daily budget that may be overspent.
    pub overspend_tolerance: f64,
    /// Rule C: current CPM above `average * multiplier` fires.
    pub cpm_spike_multiplier: f64,
    /// Rule D: current CTR below `average * multiplier` fires.
    pub ctr_drop_multiplier: f64,
    /// Rule A: minimum recent spend before zero conversions is alarming.
    pub zero_conversion_spend_floor: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            overspend_tolerance: 0.2,
            cpm_spike_multiplier: 1.5,
            ctr_drop_multiplier: 0.5,
            zero_conversion_spend_floor: 5000.0,
        }
    }
}

impl RuleThresholds {
    /// Spend ceiling for Rule B.
    pub fn budget_limit(&self, daily_budget: f64) -> f64 {
        daily_budget * (1.0 + self.overspend_tolerance)
    }

    /// CPM ceiling for Rule C.
    pub fn cpm_ceiling(&self, average_cpm: f64) -> f64 {
        average_cpm * self.cpm_spike_multiplier
    }

    /// CTR floor for Rule D.
    pub fn ctr_floor(&self, average_ctr: f64) -> f64 {
        average_ctr * self.ctr_drop_multiplier
    }

    /// Replace any value present in `overrides`.
    pub fn with_overrides(mut self, overrides: &ThresholdOverrides) -> Self {
        if let Some(v) = overrides.overspend_tolerance {
            self.overspend_tolerance = v;
        }
        if let Some(v) = overrides.cpm_spike_multiplier {
            self.cpm_spike_multiplier = v;
        }
        if let Some(v) = overrides.ctr_drop_multiplier {
            self.ctr_drop_multiplier = v;
        }
        if let Some(v) = overrides.zero_conversion_spend_floor {
            self.zero_conversion_spend_floor = v;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let values = [
            ("overspend_tolerance", self.overspend_tolerance),
            ("cpm_spike_multiplier", self.cpm_spike_multiplier),
            ("ctr_drop_multiplier", self.ctr_drop_multiplier),
            ("zero_conversion_spend_floor", self.zero_conversion_spend_floor),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(RuleError::Validation(format!(
                    "{name} must be a finite number"
                )));
            }
            if value < 0.0 {
                return Err(RuleError::Validation(format!(
                    "{name} must not be negative (got {value})"
                )));
            }
        }
        for (name, value) in [
            ("cpm_spike_multiplier", self.cpm_spike_multiplier),
            ("ctr_drop_multiplier", self.ctr_drop_multiplier),
        ] {
            if value == 0.0 {
                return Err(RuleError::Validation(format!(
                    "{name} must be greater than zero"
                )));
            }
        }
        Ok(())
    }
}
