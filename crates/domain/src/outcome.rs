//! Classified result of a single outbound backend call
//!
//! Every call to a backend service ends in exactly one of four states. Callers
//! decide between the live payload and a fallback with a plain `match`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of characters of an error body kept for logging
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// Outcome of one backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendOutcome<T> {
    /// Backend answered 2xx with a parseable body
    Success(T),
    /// Backend answered, but not with a usable success response
    ApplicationError {
        /// HTTP status returned by the backend
        status: u16,
        /// Raw (truncated) response body
        body: String,
    },
    /// The configured timeout elapsed before the backend answered
    Timeout,
    /// The backend could not be reached (refused, DNS, reset)
    Unreachable,
}

/// Payload-free discriminant of a [`BackendOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    ApplicationError,
    Timeout,
    Unreachable,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::ApplicationError => "application_error",
            Self::Timeout => "timeout",
            Self::Unreachable => "unreachable",
        };
        f.write_str(s)
    }
}

impl<T> BackendOutcome<T> {
    /// Build an application error, truncating the body
    pub fn application_error(status: u16, body: impl AsRef<str>) -> Self {
        Self::ApplicationError {
            status,
            body: truncate_body(body.as_ref()),
        }
    }

    /// Discriminant without the payload
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success(_) => OutcomeKind::Success,
            Self::ApplicationError { .. } => OutcomeKind::ApplicationError,
            Self::Timeout => OutcomeKind::Timeout,
            Self::Unreachable => OutcomeKind::Unreachable,
        }
    }

    /// Whether the backend produced a usable payload
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Transform the success payload, keeping failure states untouched
    pub fn map<U, F>(self, f: F) -> BackendOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => BackendOutcome::Success(f(value)),
            Self::ApplicationError { status, body } => {
                BackendOutcome::ApplicationError { status, body }
            },
            Self::Timeout => BackendOutcome::Timeout,
            Self::Unreachable => BackendOutcome::Unreachable,
        }
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        body.to_string()
    } else {
        body.chars().take(MAX_ERROR_BODY_CHARS).collect()
    }
}
