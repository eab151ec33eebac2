use thiserror::Error;

use crate::bundle::BundleError;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid metrics bundle: {0}")]
    InvalidBundle(#[from] BundleError),

    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for PulseError {
    fn from(e: serde_json::Error) -> Self {
        PulseError::Serialize(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PulseError>;
