use adpulse_core::Config;
use adpulse_ingest::{BundleBuilder, WindowConfig};
use adpulse_rules::{loader::resolve_thresholds, RuleEngine};

/// Shared, read-only server state.
pub struct AppState {
    pub engine: RuleEngine,
    pub builder: BundleBuilder,
    pub config: Config,
}

impl AppState {
    /// Resolve thresholds and aggregation windows from `config`.
    pub fn from_config(config: Config) -> adpulse_rules::Result<Self> {
        let engine = RuleEngine::new(resolve_thresholds(&config.rules)?)?;
        let builder = BundleBuilder::new(config.rules.daily_budget)
            .with_windows(WindowConfig::from_config(&config.ingest));
        Ok(Self {
            engine,
            builder,
            config,
        })
    }
}
