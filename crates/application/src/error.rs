//! Application-level errors

use domain::{BackendKind, DomainError};
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Backend application errors never appear here; they are absorbed into a
/// fallback. Only transport failures that the fallback policy refuses to
/// absorb surface as `BackendTimeout` / `BackendUnavailable`.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Caller sent an unusable payload
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Caller is not allowed to perform the operation
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Backend did not answer within its timeout
    #[error("The {} did not respond in time", .0.display_name())]
    BackendTimeout(BackendKind),

    /// Backend could not be reached
    #[error("The {} is unavailable", .0.display_name())]
    BackendUnavailable(BackendKind),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
