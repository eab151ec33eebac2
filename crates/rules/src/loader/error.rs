//! Error types for threshold loading and rule evaluation.

use adpulse_core::BundleError;

/// Errors that can occur while loading thresholds or evaluating a bundle.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Threshold or document validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The bundle handed to the engine is malformed.
    #[error("Invalid metrics bundle: {0}")]
    InvalidBundle(#[from] BundleError),
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;
