//! Threshold document loading.
//!
//! Submodules:
//! - `error`: RuleError type and Result alias
//! - `core`: file loading, kind checks, env overrides

mod core;
mod error;

pub use self::core::{load_thresholds, parse_document, resolve_thresholds};
pub use error::{Result, RuleError};
