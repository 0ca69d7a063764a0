//! Error types for the cask blob store.

use thiserror::Error;

/// Blob-store errors
///
/// `InvalidDigestFormat` is raised before any filesystem path is derived
/// from the offending string. `IoError` is an underlying filesystem failure,
/// surfaced without retry; retry policy belongs to the calling layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid digest: {0:?} (expected 64 lowercase hex characters)")]
    InvalidDigestFormat(String),

    #[error("Store I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),
}

/// CLI-layer errors
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::ConfigError(err.to_string())
    }
}
