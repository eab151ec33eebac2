//! Campaign anomaly rule engine.
//!
//! This crate provides:
//! - [`RuleThresholds`]: the named tunables behind the four rules
//! - [`RuleEngine`] / [`evaluate`]: metrics bundle in, ordered alerts out
//! - Rule evidence (observed value vs. threshold) for renderers
//! - A YAML `ThresholdConfig` document loader with env overrides

pub mod evaluator;
pub mod loader;
pub mod schema;
pub mod thresholds;

pub use evaluator::{evaluate, RuleCheck, RuleEngine};
pub use loader::{RuleError, Result};
pub use thresholds::RuleThresholds;
