//! Loading [`RuleThresholds`] from YAML documents and config.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use adpulse_core::config::RulesConfig;

use crate::schema::{ThresholdDocument, API_VERSION, THRESHOLD_CONFIG_KIND};
use crate::thresholds::RuleThresholds;

use super::error::{Result, RuleError};

/// Parse and validate a threshold document.
pub fn parse_document(yaml: &str) -> Result<ThresholdDocument> {
    let doc: ThresholdDocument = serde_yaml::from_str(yaml)?;

    if doc.api_version != API_VERSION {
        return Err(RuleError::Validation(format!(
            "unsupported apiVersion '{}' (expected '{}')",
            doc.api_version, API_VERSION
        )));
    }
    if doc.kind != THRESHOLD_CONFIG_KIND {
        return Err(RuleError::Validation(format!(
            "unexpected kind '{}' (expected '{}')",
            doc.kind, THRESHOLD_CONFIG_KIND
        )));
    }
    if doc.metadata.id.trim().is_empty() {
        return Err(RuleError::Validation(
            "metadata.id must not be empty".to_string(),
        ));
    }
    doc.spec.validate()?;

    Ok(doc)
}

/// Load thresholds from a YAML file.
///
/// A disabled document is ignored and the defaults are returned.
pub fn load_thresholds(path: &Path) -> Result<RuleThresholds> {
    let yaml = fs::read_to_string(path)?;
    let doc = parse_document(&yaml)?;

    if !doc.metadata.enabled {
        warn!(
            id = %doc.metadata.id,
            path = %path.display(),
            "threshold document disabled, using defaults"
        );
        return Ok(RuleThresholds::default());
    }

    info!(id = %doc.metadata.id, path = %path.display(), "loaded thresholds");
    Ok(doc.spec)
}

/// Resolve the active thresholds: file (or defaults), then env overrides.
pub fn resolve_thresholds(config: &RulesConfig) -> Result<RuleThresholds> {
    let base = match &config.thresholds_file {
        Some(path) => load_thresholds(path)?,
        None => RuleThresholds::default(),
    };
    let thresholds = base.with_overrides(&config.overrides);
    thresholds.validate()?;
    Ok(thresholds)
}
