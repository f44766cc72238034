//! Inference port - Interface for the language-model backend

use async_trait::async_trait;
use domain::BackendOutcome;
#[cfg(test)]
use mockall::automock;

/// One user message to forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub message: String,
    pub conversation_id: String,
    pub user_id: Option<String>,
}

/// Reply produced by the language model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Generated response content
    pub response: String,
    /// Model used for generation, if reported
    pub model: Option<String>,
}

/// Port for inference operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Generate a reply; every failure is a classified outcome, not an error
    async fn generate(&self, request: &GenerationRequest) -> BackendOutcome<GenerationResult>;

    /// Probe the backend's health endpoint
    async fn health(&self) -> BackendOutcome<()>;
}
