//! Backend status handler

use application::StatusReport;
use axum::{Json, extract::State};
use tracing::instrument;

use crate::state::AppState;

/// Probe every backend's health endpoint
#[instrument(skip(state))]
pub async fn services_status(State(state): State<AppState>) -> Json<StatusReport> {
    Json(state.status_service.check_all().await)
}
