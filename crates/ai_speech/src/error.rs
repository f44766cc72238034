//! Speech processing errors

use domain::BackendOutcome;
use thiserror::Error;

/// Errors that can occur while configuring speech clients or handling audio
///
/// Failures of individual backend calls are reported as a [`BackendOutcome`].
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// Invalid audio format or corrupted data
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),
}

/// Classify a transport-level reqwest failure
pub(crate) fn transport_outcome<T>(err: &reqwest::Error) -> BackendOutcome<T> {
    if err.is_timeout() {
        BackendOutcome::Timeout
    } else {
        BackendOutcome::Unreachable
    }
}
