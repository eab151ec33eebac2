use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Key lookup used to build the config. Production reads the process
/// environment; tests pass a map.
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Read a profiled key: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_opt(lookup: Lookup<'_>, profile: &str, key: &str) -> Option<String> {
    let non_empty = |k: &str| lookup(k).filter(|s| !s.is_empty());
    if !profile.is_empty() {
        if let Some(v) = non_empty(&format!("{}_{}", profile, key)) {
            return Some(v);
        }
    }
    non_empty(key)
}

fn profiled_or(lookup: Lookup<'_>, profile: &str, key: &str, default: &str) -> String {
    profiled_opt(lookup, profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_u16(lookup: Lookup<'_>, profile: &str, key: &str, default: u16) -> u16 {
    profiled_opt(lookup, profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_u32(lookup: Lookup<'_>, profile: &str, key: &str, default: u32) -> u32 {
    profiled_opt(lookup, profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_f64_opt(lookup: Lookup<'_>, profile: &str, key: &str) -> Option<f64> {
    profiled_opt(lookup, profile, key).and_then(|v| v.parse().ok())
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub rules: RulesConfig,
    pub ingest: IngestConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `ADPULSE_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        Self::from_lookup(&process_env)
    }

    /// Build config from an arbitrary key source.
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let profile = lookup("ADPULSE_PROFILE").unwrap_or_default().to_uppercase();
        let p = profile.as_str();
        Self {
            profile: profile.clone(),
            server: ServerConfig::from_lookup(lookup, p),
            rules: RulesConfig::from_lookup(lookup, p),
            ingest: IngestConfig::from_lookup(lookup, p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:  {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  rules:   daily_budget={}, thresholds_file={}",
            self.rules.daily_budget,
            self.rules
                .thresholds_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(defaults)".to_string())
        );
        tracing::info!(
            "  ingest:  recent={}m, period={}m",
            self.ingest.recent_window_minutes,
            self.ingest.period_window_minutes
        );
    }

    /// Return a JSON view for API responses.
    pub fn redacted_summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "server": { "host": self.server.host, "port": self.server.port },
            "rules": {
                "daily_budget": self.rules.daily_budget,
                "thresholds_file": self.rules.thresholds_file,
                "overrides": self.rules.overrides,
            },
            "ingest": {
                "recent_window_minutes": self.ingest.recent_window_minutes,
                "period_window_minutes": self.ingest.period_window_minutes,
            },
        })
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_lookup(lookup: Lookup<'_>, p: &str) -> Self {
        Self {
            host: profiled_or(lookup, p, "HOST", "0.0.0.0"),
            port: profiled_u16(lookup, p, "PORT", 3001),
            cors_origin: profiled_or(lookup, p, "CORS_ORIGIN", "*"),
        }
    }
}

// ── Rules ─────────────────────────────────────────────────────

pub const DEFAULT_DAILY_BUDGET: f64 = 50_000.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Optional YAML threshold document.
    pub thresholds_file: Option<PathBuf>,
    /// Budget used when a builder is not given one explicitly.
    pub daily_budget: f64,
    pub overrides: ThresholdOverrides,
}

/// Per-threshold values applied on top of the file or the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOverrides {
    pub overspend_tolerance: Option<f64>,
    pub cpm_spike_multiplier: Option<f64>,
    pub ctr_drop_multiplier: Option<f64>,
    pub zero_conversion_spend_floor: Option<f64>,
}

impl RulesConfig {
    fn from_lookup(lookup: Lookup<'_>, p: &str) -> Self {
        let daily_budget = profiled_f64_opt(lookup, p, "DAILY_BUDGET")
            .filter(|b| b.is_finite() && *b > 0.0)
            .unwrap_or(DEFAULT_DAILY_BUDGET);
        Self {
            thresholds_file: profiled_opt(lookup, p, "THRESHOLDS_FILE").map(PathBuf::from),
            daily_budget,
            overrides: ThresholdOverrides {
                overspend_tolerance: profiled_f64_opt(lookup, p, "OVERSPEND_TOLERANCE"),
                cpm_spike_multiplier: profiled_f64_opt(lookup, p, "CPM_SPIKE_MULTIPLIER"),
                ctr_drop_multiplier: profiled_f64_opt(lookup, p, "CTR_DROP_MULTIPLIER"),
                zero_conversion_spend_floor: profiled_f64_opt(
                    lookup,
                    p,
                    "ZERO_CONVERSION_SPEND_FLOOR",
                ),
            },
        }
    }
}

// ── Ingest ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Length of the "recent" window (spend/conversions), in minutes.
    pub recent_window_minutes: u32,
    /// Length of the evaluation period (daily spend, averages), in minutes.
    pub period_window_minutes: u32,
}

impl IngestConfig {
    fn from_lookup(lookup: Lookup<'_>, p: &str) -> Self {
        Self {
            recent_window_minutes: profiled_u32(lookup, p, "RECENT_WINDOW_MINUTES", 240),
            period_window_minutes: profiled_u32(lookup, p, "PERIOD_WINDOW_MINUTES", 1440),
        }
    }
}
