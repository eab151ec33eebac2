use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw per-interval observation for a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub timestamp: DateTime<Utc>,
    pub spend: f64,
    pub impressions: f64,
    pub clicks: f64,
    pub conversions: u64,
}

impl MetricRecord {
    /// Cost per thousand impressions, or `None` when nothing was served.
    pub fn cpm(&self) -> Option<f64> {
        (self.impressions > 0.0).then(|| self.spend / self.impressions * 1000.0)
    }

    /// Click-through rate in percent, or `None` when nothing was served.
    pub fn ctr(&self) -> Option<f64> {
        (self.impressions > 0.0).then(|| self.clicks / self.impressions * 100.0)
    }

    /// Describe the first problem with this row, if any.
    pub fn check(&self) -> Result<(), String> {
        for (name, value) in [
            ("spend", self.spend),
            ("impressions", self.impressions),
            ("clicks", self.clicks),
        ] {
            if !value.is_finite() {
                return Err(format!("{name} must be a finite number"));
            }
            if value < 0.0 {
                return Err(format!("{name} must not be negative (got {value})"));
            }
        }
        Ok(())
    }
}
