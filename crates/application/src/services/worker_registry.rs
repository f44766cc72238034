//! Worker registry - volatile record of self-announced worker machines
//!
//! The registry owns all worker records. Identifiers are handed out
//! sequentially starting at 1 and are never reused. Records disappear only
//! through TTL eviction or a process restart.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use domain::{DomainError, WorkerId, WorkerRecord};
use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;

/// Shared-secret gate for registrations
#[derive(Debug, Clone, Default)]
pub struct WorkerAuthPolicy {
    /// Whether registrations must present the shared secret
    pub require_auth: bool,
    /// The shared secret
    pub shared_secret: Option<SecretString>,
}

impl WorkerAuthPolicy {
    /// Open registration
    pub fn open() -> Self {
        Self::default()
    }

    /// Registration gated on `secret`
    pub fn shared_secret(secret: impl Into<String>) -> Self {
        Self {
            require_auth: true,
            shared_secret: Some(SecretString::from(secret.into())),
        }
    }

    /// Check a presented token
    ///
    /// With auth required and no secret configured, every token is refused.
    pub fn authorize(&self, token: Option<&str>) -> Result<(), ApplicationError> {
        if !self.require_auth {
            return Ok(());
        }

        let Some(secret) = &self.shared_secret else {
            return Err(ApplicationError::NotAuthorized(
                "worker registration is disabled".to_string(),
            ));
        };

        let presented = token.unwrap_or_default().as_bytes();
        let matches: bool = secret.expose_secret().as_bytes().ct_eq(presented).into();
        if matches && !presented.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::NotAuthorized(
                "invalid worker auth token".to_string(),
            ))
        }
    }
}

/// In-memory registry of workers
#[derive(Debug)]
pub struct WorkerRegistry {
    workers: RwLock<BTreeMap<WorkerId, WorkerRecord>>,
    next_id: AtomicU64,
    auth: WorkerAuthPolicy,
}

impl Default for WorkerRegistry {
    fn default() -> Self {
        Self::new(WorkerAuthPolicy::open())
    }
}

impl WorkerRegistry {
    /// Create an empty registry
    pub fn new(auth: WorkerAuthPolicy) -> Self {
        Self {
            workers: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(WorkerId::FIRST.value()),
            auth,
        }
    }

    /// Register a worker
    #[instrument(skip(self, auth_token), fields(worker_name = %name))]
    pub fn register(
        &self,
        name: &str,
        url: &str,
        auth_token: Option<String>,
    ) -> Result<WorkerRecord, ApplicationError> {
        self.register_at(name, url, auth_token, Utc::now())
    }

    /// Register a worker at an explicit time
    pub fn register_at(
        &self,
        name: &str,
        url: &str,
        auth_token: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<WorkerRecord, ApplicationError> {
        if let Err(err) = self.auth.authorize(auth_token.as_deref()) {
            warn!(worker_name = %name, "Rejected worker registration");
            return Err(err);
        }

        // Rejected registrations must not consume an id
        let mut record = WorkerRecord::register(WorkerId::FIRST, name, url, auth_token, now)?;

        let mut workers = self.workers.write();
        record.id = WorkerId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        workers.insert(record.id, record.clone());
        drop(workers);

        info!(worker_id = %record.id, url = %record.url, "Worker registered");
        Ok(record)
    }

    /// All workers ordered by id
    pub fn list(&self) -> Vec<WorkerRecord> {
        self.workers.read().values().cloned().collect()
    }

    /// Record a heartbeat
    pub fn heartbeat(&self, id: WorkerId) -> Result<WorkerRecord, ApplicationError> {
        self.heartbeat_at(id, Utc::now())
    }

    /// Record a heartbeat at an explicit time
    pub fn heartbeat_at(
        &self,
        id: WorkerId,
        now: DateTime<Utc>,
    ) -> Result<WorkerRecord, ApplicationError> {
        let mut workers = self.workers.write();
        let Some(worker) = workers.get_mut(&id) else {
            return Err(DomainError::not_found("Worker", id.to_string()).into());
        };
        worker.touch(now);
        debug!(worker_id = %id, "Worker heartbeat");
        Ok(worker.clone())
    }

    /// Remove workers not seen since `cutoff`; returns how many were removed
    pub fn evict_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        let mut workers = self.workers.write();
        let before = workers.len();
        workers.retain(|_, worker| !worker.is_stale(cutoff));
        let removed = before - workers.len();
        drop(workers);

        if removed > 0 {
            info!(removed, "Evicted stale workers");
        }
        removed
    }

    /// Remove workers not seen within `ttl` of `now`
    ///
    /// A `ttl` reaching before the earliest representable instant evicts
    /// nothing.
    pub fn evict_stale(&self, ttl: Duration, now: DateTime<Utc>) -> usize {
        match now.checked_sub_signed(ttl) {
            Some(cutoff) => self.evict_older_than(cutoff),
            None => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.workers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.read().is_empty()
    }
}
