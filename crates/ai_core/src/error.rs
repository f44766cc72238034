//! Inference errors and transport classification

use domain::BackendOutcome;
use thiserror::Error;

/// Errors raised while setting up the language-model client
///
/// Failures of individual calls are not errors; they are reported as a
/// [`BackendOutcome`].
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

/// Classify a transport-level reqwest failure
pub(crate) fn transport_outcome<T>(err: &reqwest::Error) -> BackendOutcome<T> {
    if err.is_timeout() {
        BackendOutcome::Timeout
    } else {
        BackendOutcome::Unreachable
    }
}
