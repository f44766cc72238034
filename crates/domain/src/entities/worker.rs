//! Worker entity - a machine that announced itself as a backend host

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use crate::errors::DomainError;
use crate::value_objects::WorkerId;

/// A registered worker
///
/// Lives only in process memory. `last_seen` moves forward on every heartbeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub id: WorkerId,
    pub name: String,
    pub url: String,
    /// Token the worker presented on registration; never echoed back
    #[serde(skip_serializing, default)]
    pub auth_token: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl WorkerRecord {
    /// Create a freshly registered worker
    ///
    /// `last_seen` starts equal to `registered_at`.
    pub fn register(
        id: WorkerId,
        name: &str,
        url: &str,
        auth_token: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::ValidationError(
                "worker_name cannot be empty".to_string(),
            ));
        }

        let url = normalize_url(url)?;

        Ok(Self {
            id,
            name: name.to_string(),
            url,
            auth_token,
            registered_at: now,
            last_seen: now,
        })
    }

    /// Record a heartbeat
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_seen {
            self.last_seen = now;
        }
    }

    /// Whether the worker has not been seen since `cutoff`
    pub fn is_stale(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_seen < cutoff
    }
}

fn normalize_url(url: &str) -> Result<String, DomainError> {
    let url = url.trim().trim_end_matches('/');
    let has_http_scheme = url.starts_with("http://") || url.starts_with("https://");
    if !has_http_scheme || !url.validate_url() {
        return Err(DomainError::InvalidWorkerUrl(url.to_string()));
    }
    Ok(url.to_string())
}
