//! Metrics bundle builders.
//!
//! Everything that turns raw campaign data into a [`MetricsBundle`] for the
//! rule engine:
//! - [`builder`]: window aggregation of per-interval rows
//! - [`synthetic`]: seeded demo data with injectable failure scenarios
//! - [`form`]: manual entry with field-level validation
//! - [`rows`]: JSON / JSON-lines row files
//!
//! [`MetricsBundle`]: adpulse_core::MetricsBundle

pub mod builder;
pub mod form;
pub mod rows;
pub mod synthetic;

pub use builder::{BundleBuilder, BundleReport, LiveMetrics, WindowConfig};
pub use form::{BundleForm, FieldError, FormErrors};
pub use rows::RowImporter;
pub use synthetic::Scenario;
