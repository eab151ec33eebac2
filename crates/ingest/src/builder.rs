//! Window aggregation of raw interval rows into a [`MetricsBundle`].
//!
//! "Now" is the newest row's timestamp. The recent window (default 4h)
//! feeds spend and conversions; the period window (default 24h) feeds daily
//! spend and the CPM/CTR baselines. Rows without impressions are left out of
//! every rate so no division by zero reaches the engine.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use adpulse_core::config::IngestConfig;
use adpulse_core::{MetricRecord, MetricsBundle, PulseError, Result};

/// Aggregation window lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    pub recent: Duration,
    pub period: Duration,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            recent: Duration::hours(4),
            period: Duration::hours(24),
        }
    }
}

impl WindowConfig {
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            recent: Duration::minutes(i64::from(config.recent_window_minutes)),
            period: Duration::minutes(i64::from(config.period_window_minutes)),
        }
    }
}

/// Latest-interval snapshot shown next to the alerts.
///
/// Every field comes from the newest row that served impressions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveMetrics {
    pub timestamp: DateTime<Utc>,
    pub spend: f64,
    pub cpm: f64,
    /// Current CPM minus the period average.
    pub cpm_delta: f64,
    pub ctr: f64,
}

/// A built bundle plus the context it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleReport {
    pub bundle: MetricsBundle,
    pub live: LiveMetrics,
    pub recent_rows: usize,
    pub period_rows: usize,
    pub recent_start: DateTime<Utc>,
    pub period_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

/// Aggregates rows into bundles for one campaign budget.
#[derive(Debug, Clone)]
pub struct BundleBuilder {
    windows: WindowConfig,
    daily_budget: f64,
}

impl BundleBuilder {
    pub fn new(daily_budget: f64) -> Self {
        Self {
            windows: WindowConfig::default(),
            daily_budget,
        }
    }

    pub fn with_windows(mut self, windows: WindowConfig) -> Self {
        self.windows = windows;
        self
    }

    /// Same windows, different budget.
    pub fn with_budget(&self, daily_budget: f64) -> Self {
        Self {
            windows: self.windows,
            daily_budget,
        }
    }

    pub fn daily_budget(&self) -> f64 {
        self.daily_budget
    }

    pub fn windows(&self) -> WindowConfig {
        self.windows
    }

    /// Aggregate `rows` (any order) into a validated bundle.
    pub fn build(&self, rows: &[MetricRecord]) -> Result<BundleReport> {
        if rows.is_empty() {
            return Err(PulseError::Other(
                "cannot build a metrics bundle from zero rows".to_string(),
            ));
        }
        for (row, record) in rows.iter().enumerate() {
            record
                .check()
                .map_err(|message| PulseError::InvalidRecord { row, message })?;
        }

        // Input indices travel with the rows so errors point at the caller's row.
        let mut ordered: Vec<(usize, &MetricRecord)> = rows.iter().enumerate().collect();
        ordered.sort_by_key(|(_, r)| r.timestamp);

        let window_end = ordered[ordered.len() - 1].1.timestamp;
        let recent_start = window_end - self.windows.recent;
        let period_start = window_end - self.windows.period;

        let recent: Vec<(usize, &MetricRecord)> = ordered
            .iter()
            .copied()
            .filter(|(_, r)| r.timestamp > recent_start)
            .collect();
        let period: Vec<&MetricRecord> = ordered
            .iter()
            .map(|(_, r)| *r)
            .filter(|r| r.timestamp > period_start)
            .collect();

        let spend_last_4h: f64 = recent.iter().map(|(_, r)| r.spend).sum();
        let conversions_last_4h = recent.iter().try_fold(0u64, |total, (row, r)| {
            total
                .checked_add(r.conversions)
                .ok_or_else(|| PulseError::InvalidRecord {
                    row: *row,
                    message: "conversions overflow the recent-window total".to_string(),
                })
        })?;
        let daily_spend: f64 = period.iter().map(|r| r.spend).sum();

        // Rates only exist for rows that served impressions.
        let served: Vec<(&MetricRecord, f64, f64)> = period
            .iter()
            .filter_map(|r| Some((*r, r.cpm()?, r.ctr()?)))
            .collect();
        let (latest, current_cpm, current_ctr) = *served.last().ok_or_else(|| {
            PulseError::Other("no row in the evaluation period has impressions".to_string())
        })?;
        let average_cpm = mean(served.iter().map(|(_, cpm, _)| *cpm));
        let average_ctr = mean(served.iter().map(|(_, _, ctr)| *ctr));

        let bundle = MetricsBundle {
            spend_last_4h,
            conversions_last_4h,
            daily_spend,
            daily_budget: self.daily_budget,
            current_cpm,
            average_cpm,
            current_ctr,
            average_ctr,
        };
        bundle.validate()?;

        debug!(
            rows = rows.len(),
            recent_rows = recent.len(),
            period_rows = period.len(),
            spend_last_4h,
            daily_spend,
            "built metrics bundle"
        );

        Ok(BundleReport {
            bundle,
            live: LiveMetrics {
                timestamp: latest.timestamp,
                spend: latest.spend,
                cpm: current_cpm,
                cpm_delta: current_cpm - average_cpm,
                ctr: current_ctr,
            },
            recent_rows: recent.len(),
            period_rows: period.len(),
            recent_start,
            period_start,
            window_end,
        })
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
