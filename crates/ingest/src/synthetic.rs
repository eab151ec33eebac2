//! Synthetic campaign data with injectable failure scenarios.
//!
//! Produces one day of quarter-hour rows around a steady baseline, then
//! overwrites the tail to simulate a specific failure. Used for demos and
//! end-to-end tests; seeded generators are fully deterministic.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use adpulse_core::{MetricRecord, RuleId};

/// Rows per generated day (24h of 15-minute intervals).
pub const ROWS_PER_DAY: usize = 24 * 4;
/// Interval length of generated rows.
pub const INTERVAL_MINUTES: i64 = 15;

/// Failure pattern injected into the generated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    Normal,
    ZeroConversions,
    PacingBreach,
    CostSpike,
    QualityDrop,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Normal,
        Scenario::ZeroConversions,
        Scenario::PacingBreach,
        Scenario::CostSpike,
        Scenario::QualityDrop,
    ];

    /// Kebab-case identifier, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Scenario::Normal => "normal",
            Scenario::ZeroConversions => "zero-conversions",
            Scenario::PacingBreach => "pacing-breach",
            Scenario::CostSpike => "cost-spike",
            Scenario::QualityDrop => "quality-drop",
        }
    }

    /// Human-readable description.
    pub fn label(self) -> &'static str {
        match self {
            Scenario::Normal => "Normal",
            Scenario::ZeroConversions => "Rule A: Zero Conversions (Broken Pixel)",
            Scenario::PacingBreach => "Rule B: Pacing Breach (Overspend)",
            Scenario::CostSpike => "Rule C: Cost Spike (High CPM)",
            Scenario::QualityDrop => "Rule D: Quality Drop (Low CTR)",
        }
    }

    /// The rule this scenario is designed to trip.
    pub fn target_rule(self) -> Option<RuleId> {
        match self {
            Scenario::Normal => None,
            Scenario::ZeroConversions => Some(RuleId::A),
            Scenario::PacingBreach => Some(RuleId::B),
            Scenario::CostSpike => Some(RuleId::C),
            Scenario::QualityDrop => Some(RuleId::D),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Scenario::Normal),
            "zero-conversions" | "rule-a" => Ok(Scenario::ZeroConversions),
            "pacing-breach" | "rule-b" => Ok(Scenario::PacingBreach),
            "cost-spike" | "rule-c" => Ok(Scenario::CostSpike),
            "quality-drop" | "rule-d" => Ok(Scenario::QualityDrop),
            other => Err(format!("unknown scenario: '{}'", other)),
        }
    }
}

/// Sample N(mean, sd), clamped at zero.
fn sample<R: Rng>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    Normal::new(mean, sd)
        .map(|dist| dist.sample(rng))
        .unwrap_or(mean)
        .max(0.0)
}

/// Generate one day of rows ending at `end`, with `scenario` injected.
pub fn generate<R: Rng>(scenario: Scenario, end: DateTime<Utc>, rng: &mut R) -> Vec<MetricRecord> {
    let mut rows: Vec<MetricRecord> = (0..ROWS_PER_DAY)
        .map(|i| {
            let steps_back = (ROWS_PER_DAY - 1 - i) as i64;
            MetricRecord {
                timestamp: end - Duration::minutes(INTERVAL_MINUTES * steps_back),
                spend: sample(rng, 500.0, 50.0),
                impressions: sample(rng, 5000.0, 500.0),
                clicks: sample(rng, 150.0, 20.0),
                conversions: rng.gen_range(0..5),
            }
        })
        .collect();

    let tail = |n: usize| ROWS_PER_DAY.saturating_sub(n)..ROWS_PER_DAY;

    match scenario {
        Scenario::Normal => {}
        Scenario::ZeroConversions => {
            // Spend keeps flowing while conversions stop for the last 4h.
            for i in tail(16) {
                rows[i].conversions = 0;
                rows[i].spend = 600.0;
            }
        }
        Scenario::PacingBreach => {
            for i in tail(10) {
                rows[i].spend = 3000.0;
            }
        }
        Scenario::CostSpike => {
            // Same money, a tenth of the impressions.
            for i in tail(8) {
                rows[i].impressions = 500.0;
                rows[i].spend = 800.0;
            }
        }
        Scenario::QualityDrop => {
            for i in tail(20) {
                rows[i].clicks = 10.0;
            }
        }
    }

    rows
}

/// Deterministic variant of [`generate`].
pub fn generate_seeded(scenario: Scenario, end: DateTime<Utc>, seed: u64) -> Vec<MetricRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(scenario, end, &mut rng)
}
