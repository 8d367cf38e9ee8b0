//! Error types for SociaLytix

use thiserror::Error;

/// Errors that can occur during scoring and chat handling
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid scoring artifact: {0}")]
    InvalidArtifact(String),

    #[error("Feature count mismatch for model '{target}': expected {expected}, got {got}")]
    FeatureMismatch {
        target: String,
        expected: usize,
        got: usize,
    },

    #[error("No active session: {0}")]
    NoActiveSession(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Summary API error: {0}")]
    SummaryApiError(String),

    #[error("Missing configuration: {0}")]
    ConfigError(String),
}
