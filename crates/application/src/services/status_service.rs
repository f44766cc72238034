//! Service status probe
//!
//! Probes each backend's health endpoint concurrently and reports one
//! classification per backend. Backend URLs are never part of the report.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{BackendKind, BackendOutcome};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{InferencePort, SpeechToTextPort, TextToSpeechPort};

/// Default bound for a single health probe in seconds
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// Reachability classification of one backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    /// Health endpoint answered 2xx
    Online,
    /// Health endpoint answered with an error status
    Error,
    /// Health endpoint did not answer in time
    Timeout,
    /// Backend could not be reached
    Offline,
}

/// Status of an individual backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: ProbeStatus,
    /// HTTP status of the health endpoint, if it answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
}

impl ServiceStatus {
    /// Classify a health probe outcome
    pub fn from_outcome(outcome: &BackendOutcome<()>) -> Self {
        match outcome {
            BackendOutcome::Success(()) => Self {
                status: ProbeStatus::Online,
                http_status: Some(200),
            },
            BackendOutcome::ApplicationError { status, .. } => Self {
                status: ProbeStatus::Error,
                http_status: Some(*status),
            },
            BackendOutcome::Timeout => Self {
                status: ProbeStatus::Timeout,
                http_status: None,
            },
            BackendOutcome::Unreachable => Self {
                status: ProbeStatus::Offline,
                http_status: None,
            },
        }
    }

    pub const fn is_online(&self) -> bool {
        matches!(self.status, ProbeStatus::Online)
    }
}

/// Per-backend statuses, keyed like [`BackendKind::key`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendStatuses {
    pub speech_to_text: ServiceStatus,
    pub language_model: ServiceStatus,
    pub speech_synthesis: ServiceStatus,
}

impl BackendStatuses {
    pub const fn get(&self, kind: BackendKind) -> &ServiceStatus {
        match kind {
            BackendKind::SpeechToText => &self.speech_to_text,
            BackendKind::LanguageModel => &self.language_model,
            BackendKind::SpeechSynthesis => &self.speech_synthesis,
        }
    }
}

/// Result of `/api/services/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub timestamp: DateTime<Utc>,
    pub all_online: bool,
    pub services: BackendStatuses,
}

/// Service probing the three backends
pub struct StatusService {
    stt: Arc<dyn SpeechToTextPort>,
    inference: Arc<dyn InferencePort>,
    tts: Arc<dyn TextToSpeechPort>,
    probe_timeout: Duration,
}

impl std::fmt::Debug for StatusService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusService")
            .field("probe_timeout", &self.probe_timeout)
            .finish_non_exhaustive()
    }
}

impl StatusService {
    /// Create a new status service
    pub fn new(
        stt: Arc<dyn SpeechToTextPort>,
        inference: Arc<dyn InferencePort>,
        tts: Arc<dyn TextToSpeechPort>,
    ) -> Self {
        Self {
            stt,
            inference,
            tts,
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        }
    }

    /// Override the per-probe bound
    #[must_use]
    pub const fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    async fn probe<F>(&self, kind: BackendKind, health: F) -> ServiceStatus
    where
        F: std::future::Future<Output = BackendOutcome<()>>,
    {
        let outcome = timeout(self.probe_timeout, health)
            .await
            .unwrap_or(BackendOutcome::Timeout);

        let status = ServiceStatus::from_outcome(&outcome);
        if status.is_online() {
            debug!(backend = %kind.key(), "Backend online");
        } else {
            warn!(backend = %kind.key(), outcome = %outcome.kind(), "Backend not online");
        }
        status
    }

    /// Probe every backend concurrently
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> StatusReport {
        let (speech_to_text, language_model, speech_synthesis) = tokio::join!(
            self.probe(BackendKind::SpeechToText, self.stt.health()),
            self.probe(BackendKind::LanguageModel, self.inference.health()),
            self.probe(BackendKind::SpeechSynthesis, self.tts.health()),
        );

        let services = BackendStatuses {
            speech_to_text,
            language_model,
            speech_synthesis,
        };
        let all_online = BackendKind::ALL
            .iter()
            .all(|kind| services.get(*kind).is_online());

        StatusReport {
            timestamp: Utc::now(),
            all_online,
            services,
        }
    }
}
