//! API error handling
//!
//! Every error leaves the gateway as `{"detail": ..., "code": ...}`. Internal
//! errors are logged and replaced by a generic message.

use application::ApplicationError;
use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Generic detail returned for internal errors
const INTERNAL_DETAIL: &str = "An internal error occurred";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable explanation
    pub detail: String,
    /// Stable machine-readable code
    pub code: String,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::GatewayTimeout(_) => "gateway_timeout",
            Self::Internal(_) => "internal_error",
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::NotFound(msg)
            | Self::PayloadTooLarge(msg)
            | Self::ServiceUnavailable(msg)
            | Self::GatewayTimeout(msg) => msg.clone(),
            Self::Internal(_) => INTERNAL_DETAIL.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(msg) = &self {
            error!(error = %msg, "Internal error while handling request");
        }

        let body = ErrorResponse {
            detail: self.detail(),
            code: self.code().to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(DomainError::NotFound { entity_type, id }) => {
                Self::NotFound(format!("{entity_type} {id} not found"))
            },
            ApplicationError::Domain(
                e @ (DomainError::InvalidWorkerUrl(_) | DomainError::ValidationError(_)),
            ) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            ApplicationError::NotAuthorized(msg) => Self::Unauthorized(msg),
            e @ ApplicationError::BackendTimeout(_) => Self::GatewayTimeout(e.to_string()),
            e @ ApplicationError::BackendUnavailable(_) => {
                Self::ServiceUnavailable(e.to_string())
            },
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge("request body is too large".to_string())
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge("audio upload is too large".to_string())
        } else {
            Self::BadRequest(err.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use domain::BackendKind;

    use super::*;

    async fn body_of(error: ApiError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bad_request_shape() {
        let (status, body) = body_of(ApiError::BadRequest("message cannot be empty".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "bad_request");
        assert_eq!(body.detail, "message cannot be empty");
    }

    #[tokio::test]
    async fn internal_detail_is_generic() {
        let (status, body) =
            body_of(ApiError::Internal("panic at /srv/luz/src/main.rs:42".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "internal_error");
        assert_eq!(body.detail, INTERNAL_DETAIL);
    }

    #[test]
    fn application_errors_map_to_status() {
        let cases = [
            (ApplicationError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (ApplicationError::NotAuthorized("x".into()), StatusCode::UNAUTHORIZED),
            (
                DomainError::not_found("Worker", "9").into(),
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::InvalidWorkerUrl("ftp://x".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApplicationError::BackendTimeout(BackendKind::SpeechToText),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ApplicationError::BackendUnavailable(BackendKind::LanguageModel),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (ApplicationError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn backend_errors_name_the_service_only() {
        let err = ApiError::from(ApplicationError::BackendUnavailable(BackendKind::SpeechToText));
        assert_eq!(err.code(), "service_unavailable");
        assert_eq!(err.detail(), "The speech recognition service is unavailable");
    }
}
