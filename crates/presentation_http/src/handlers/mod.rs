//! HTTP request handlers

pub mod chat;
pub mod health;
pub mod speech;
pub mod status;
pub mod workers;

use crate::error::ApiError;

/// Unknown route
pub async fn not_found() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}
