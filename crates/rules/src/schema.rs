//! YAML threshold document.
//!
//! ```yaml
//! apiVersion: v1
//! kind: ThresholdConfig
//! metadata:
//!   id: thresholds-default
//!   name: Default thresholds
//! spec:
//!   overspend_tolerance: 0.2
//!   zero_conversion_spend_floor: 8000
//! ```

use serde::{Deserialize, Serialize};

use crate::thresholds::RuleThresholds;

pub const API_VERSION: &str = "v1";
pub const THRESHOLD_CONFIG_KIND: &str = "ThresholdConfig";

/// Top-level threshold document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ThresholdDocument {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    #[serde(default)]
    pub spec: RuleThresholds,
}

/// Document metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CommonMetadata {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}
