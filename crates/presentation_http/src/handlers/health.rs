//! Greeting and liveness handlers

use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Routes advertised by the greeting endpoint
pub const ENDPOINTS: &[&str] = &[
    "/health",
    "/api/services/status",
    "/api/chat",
    "/api/transcribe",
    "/api/tts",
    "/api/worker/register",
    "/api/workers",
    "/api/worker/heartbeat/{id}",
];

/// Greeting response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

/// Service greeting
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Luz Assistant Cloud".to_string(),
        status: "online".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ENDPOINTS.iter().map(ToString::to_string).collect(),
    })
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Liveness check - is the gateway running?
///
/// Never touches a backend.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}
