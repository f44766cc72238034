//! Worker registry handlers

use application::ApplicationError;
use axum::{
    Json,
    extract::{Path, State},
};
use domain::{WorkerId, WorkerRecord};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Worker registration body
#[derive(Deserialize, Validate)]
pub struct RegisterWorkerRequest {
    #[validate(length(min = 1, message = "worker_url cannot be empty"))]
    pub worker_url: String,
    #[validate(length(min = 1, message = "worker_name cannot be empty"))]
    pub worker_name: String,
    /// Shared secret, required when worker auth is enabled
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for RegisterWorkerRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterWorkerRequest")
            .field("worker_url", &self.worker_url)
            .field("worker_name", &self.worker_name)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Registration acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterWorkerResponse {
    pub worker_id: WorkerId,
    pub status: String,
}

/// Registered workers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerListResponse {
    pub count: usize,
    pub workers: Vec<WorkerRecord>,
}

/// Heartbeat acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatResponse {
    pub status: String,
    pub worker_id: WorkerId,
}

/// Register a worker
#[instrument(skip(state, request), fields(worker_name = %request.worker_name))]
pub async fn register_worker(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterWorkerRequest>,
) -> Result<Json<RegisterWorkerResponse>, ApiError> {
    let record = state.workers.register(
        &request.worker_name,
        &request.worker_url,
        request.auth_token,
    )?;

    Ok(Json(RegisterWorkerResponse {
        worker_id: record.id,
        status: "registered".to_string(),
    }))
}

/// List registered workers ordered by id
pub async fn list_workers(State(state): State<AppState>) -> Json<WorkerListResponse> {
    let workers = state.workers.list();
    Json(WorkerListResponse {
        count: workers.len(),
        workers,
    })
}

/// Record a worker heartbeat
#[instrument(skip(state))]
pub async fn heartbeat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HeartbeatResponse>, ApiError> {
    let id: WorkerId = id.parse().map_err(ApplicationError::from)?;
    let record = state.workers.heartbeat(id)?;

    Ok(Json(HeartbeatResponse {
        status: "ok".to_string(),
        worker_id: record.id,
    }))
}
