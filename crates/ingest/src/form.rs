//! Manually entered bundles.
//!
//! Every field starts unset. Submission is blocked with one message per
//! offending field; nothing is defaulted.

use std::fmt;

use serde::{Deserialize, Serialize};

use adpulse_core::MetricsBundle;

/// A bundle as typed into a form: any field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleForm {
    pub spend_last_4h: Option<f64>,
    pub conversions_last_4h: Option<f64>,
    pub daily_spend: Option<f64>,
    pub daily_budget: Option<f64>,
    pub current_cpm: Option<f64>,
    pub average_cpm: Option<f64>,
    pub current_ctr: Option<f64>,
    pub average_ctr: Option<f64>,
}

/// Validation message for one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field errors of a rejected submission, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FormErrors {}

impl FormErrors {
    /// Whether `field` has an error.
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// A present, finite, non-negative number.
    fn amount(&mut self, field: &str, value: Option<f64>) -> f64 {
        match value {
            None => {
                self.fail(field, "required");
                0.0
            }
            Some(v) if !v.is_finite() => {
                self.fail(field, "must be a number");
                0.0
            }
            Some(v) if v < 0.0 => {
                self.fail(field, "must not be negative");
                0.0
            }
            Some(v) => v,
        }
    }

    fn count(&mut self, field: &str, value: Option<f64>) -> u64 {
        let before = self.errors.len();
        let v = self.amount(field, value);
        if self.errors.len() > before {
            return 0;
        }
        if v.fract() != 0.0 {
            self.fail(field, "must be a whole number");
            return 0;
        }
        // u64::MAX as f64 rounds up to 2^64, the first value that does not fit.
        if v >= u64::MAX as f64 {
            self.fail(field, "too large");
            return 0;
        }
        v as u64
    }

    fn budget(&mut self, field: &str, value: Option<f64>) -> f64 {
        let before = self.errors.len();
        let v = self.amount(field, value);
        if self.errors.len() == before && v <= 0.0 {
            self.fail(field, "must be greater than zero");
        }
        v
    }
}

impl BundleForm {
    /// Convert to a bundle, or report every invalid field.
    pub fn into_bundle(self) -> Result<MetricsBundle, FormErrors> {
        let mut c = Checker { errors: Vec::new() };

        let bundle = MetricsBundle {
            spend_last_4h: c.amount("spend_last_4h", self.spend_last_4h),
            conversions_last_4h: c.count("conversions_last_4h", self.conversions_last_4h),
            daily_spend: c.amount("daily_spend", self.daily_spend),
            daily_budget: c.budget("daily_budget", self.daily_budget),
            current_cpm: c.amount("current_cpm", self.current_cpm),
            average_cpm: c.amount("average_cpm", self.average_cpm),
            current_ctr: c.amount("current_ctr", self.current_ctr),
            average_ctr: c.amount("average_ctr", self.average_ctr),
        };

        if c.errors.is_empty() {
            Ok(bundle)
        } else {
            Err(FormErrors { errors: c.errors })
        }
    }
}

impl From<MetricsBundle> for BundleForm {
    fn from(b: MetricsBundle) -> Self {
        Self {
            spend_last_4h: Some(b.spend_last_4h),
            conversions_last_4h: Some(b.conversions_last_4h as f64),
            daily_spend: Some(b.daily_spend),
            daily_budget: Some(b.daily_budget),
            current_cpm: Some(b.current_cpm),
            average_cpm: Some(b.average_cpm),
            current_ctr: Some(b.current_ctr),
            average_ctr: Some(b.average_ctr),
        }
    }
}
