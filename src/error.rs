//! Error taxonomy for the analysis pipeline.
//!
//! The pipeline is fail-fast: a provider error is returned to the caller as-is,
//! without retries or local recovery. An empty sequence is **not** an error.

use thiserror::Error;

/// Main error type for phazegen operations.
#[derive(Error, Debug)]
pub enum PhazeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A feature provider failed while computing `stage`.
    #[error("Provider error in {stage}: {message}")]
    Provider { stage: &'static str, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for phazegen operations.
pub type Result<T> = std::result::Result<T, PhazeError>;

impl PhazeError {
    /// Convenience constructor for provider failures.
    pub fn provider(stage: &'static str, message: impl Into<String>) -> Self {
        PhazeError::Provider { stage, message: message.into() }
    }
}

impl From<serde_json::Error> for PhazeError {
    fn from(err: serde_json::Error) -> Self {
        PhazeError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for PhazeError {
    fn from(err: toml::de::Error) -> Self {
        PhazeError::Configuration(err.to_string())
    }
}
