//! Text and JSON views of an evaluation.
//!
//! Text output is a list of [`Line`]s tagged with a [`Tone`]; the terminal
//! decides how (or whether) to color each tone.

use serde::Serialize;

use adpulse_core::{Alert, MetricRecord, MetricsBundle, Severity};
use adpulse_ingest::{LiveMetrics, Scenario};
use adpulse_rules::evaluator::currency;
use adpulse_rules::{RuleCheck, RuleThresholds};

pub const NOMINAL: &str = "System Nominal. No anomalies detected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Header,
    Critical,
    High,
    Medium,
    Nominal,
    Dim,
}

impl From<Severity> for Tone {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Critical => Tone::Critical,
            Severity::High => Tone::High,
            Severity::Medium => Tone::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub tone: Tone,
    pub text: String,
}

impl Line {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(Tone::Plain, "")
    }
}

/// Everything one command evaluated.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<Scenario>,
    pub bundle: MetricsBundle,
    pub alerts: Vec<Alert>,
    pub evidence: Vec<RuleCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live: Option<LiveMetrics>,
    /// Raw rows to display, newest first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recent_rows: Vec<MetricRecord>,
}

/// Card for one alert.
pub fn alert_card(alert: &Alert) -> Vec<Line> {
    vec![
        Line::new(
            alert.severity.into(),
            format!("{} | {}", alert.severity, alert.rule.label()),
        ),
        Line::new(Tone::Plain, format!("  Diagnosis: {}", alert.message)),
        Line::new(Tone::Plain, format!("  Recommended Action: {}", alert.action)),
    ]
}

fn bundle_lines(b: &MetricsBundle) -> Vec<Line> {
    vec![
        Line::new(Tone::Header, "Metrics"),
        Line::new(Tone::Plain, format!("  Spend (recent):   {}", currency(b.spend_last_4h))),
        Line::new(Tone::Plain, format!("  Conversions:      {}", b.conversions_last_4h)),
        Line::new(
            Tone::Plain,
            format!(
                "  Daily spend:      {} of {}",
                currency(b.daily_spend),
                currency(b.daily_budget)
            ),
        ),
        Line::new(
            Tone::Plain,
            format!("  CPM:              ₹{:.2} (avg ₹{:.2})", b.current_cpm, b.average_cpm),
        ),
        Line::new(
            Tone::Plain,
            format!("  CTR:              {:.2}% (avg {:.2}%)", b.current_ctr, b.average_ctr),
        ),
    ]
}

fn live_lines(live: &LiveMetrics) -> Vec<Line> {
    vec![
        Line::new(
            Tone::Header,
            format!("Live Metrics ({})", live.timestamp.format("%Y-%m-%d %H:%M UTC")),
        ),
        Line::new(Tone::Plain, format!("  Spend: ₹{:.2}", live.spend)),
        Line::new(Tone::Plain, format!("  CPM:   ₹{:.2} ({:+.2})", live.cpm, live.cpm_delta)),
        Line::new(Tone::Plain, format!("  CTR:   {:.2}%", live.ctr)),
    ]
}

fn row_lines(rows: &[MetricRecord]) -> Vec<Line> {
    let mut lines = vec![
        Line::new(Tone::Header, "Raw Data Log"),
        Line::new(
            Tone::Dim,
            format!(
                "  {:<17} {:>10} {:>11} {:>8} {:>11}",
                "timestamp", "spend", "impressions", "clicks", "conversions"
            ),
        ),
    ];
    lines.extend(rows.iter().map(|r| {
        Line::new(
            Tone::Plain,
            format!(
                "  {:<17} {:>10.2} {:>11.0} {:>8.0} {:>11}",
                r.timestamp.format("%Y-%m-%d %H:%M"),
                r.spend,
                r.impressions,
                r.clicks,
                r.conversions
            ),
        )
    }));
    lines
}

/// Full text report.
pub fn evaluation_lines(e: &Evaluation) -> Vec<Line> {
    let mut lines = Vec::new();
    if let Some(scenario) = e.scenario {
        lines.push(Line::new(Tone::Dim, format!("Scenario: {}", scenario.label())));
        lines.push(Line::blank());
    }

    if e.alerts.is_empty() {
        lines.push(Line::new(Tone::Nominal, NOMINAL));
    } else {
        lines.push(Line::new(
            Tone::Critical,
            format!("{} Active Anomalies Detected", e.alerts.len()),
        ));
        for alert in &e.alerts {
            lines.push(Line::blank());
            lines.extend(alert_card(alert));
        }
    }

    lines.push(Line::blank());
    lines.extend(bundle_lines(&e.bundle));

    if let Some(live) = &e.live {
        lines.push(Line::blank());
        lines.extend(live_lines(live));
    }
    if !e.recent_rows.is_empty() {
        lines.push(Line::blank());
        lines.extend(row_lines(&e.recent_rows));
    }
    lines
}

pub fn threshold_lines(t: &RuleThresholds) -> Vec<Line> {
    vec![
        Line::new(Tone::Header, "Active Thresholds"),
        Line::new(
            Tone::Plain,
            format!(
                "  zero_conversion_spend_floor  {}  (Rule A: spend > floor, 0 conversions)",
                t.zero_conversion_spend_floor
            ),
        ),
        Line::new(
            Tone::Plain,
            format!(
                "  overspend_tolerance          {}  (Rule B: daily spend > budget x {})",
                t.overspend_tolerance,
                1.0 + t.overspend_tolerance
            ),
        ),
        Line::new(
            Tone::Plain,
            format!(
                "  cpm_spike_multiplier         {}  (Rule C: CPM > average x {})",
                t.cpm_spike_multiplier, t.cpm_spike_multiplier
            ),
        ),
        Line::new(
            Tone::Plain,
            format!(
                "  ctr_drop_multiplier          {}  (Rule D: CTR < average x {})",
                t.ctr_drop_multiplier, t.ctr_drop_multiplier
            ),
        ),
    ]
}

/// Lines joined without any styling.
pub fn plain(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
