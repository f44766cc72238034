//! Port definitions for the language-model backend

use async_trait::async_trait;
use domain::BackendOutcome;
use serde::{Deserialize, Serialize};

/// Body sent to `POST /generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// User message
    pub prompt: String,
    /// Conversation the message belongs to
    pub conversation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            conversation_id: conversation_id.into(),
            user_id: None,
        }
    }

    #[must_use]
    pub fn with_user(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }
}

/// Body returned by `POST /generate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated reply
    pub response: String,
    /// Model that produced the reply, if reported
    #[serde(default)]
    pub model: Option<String>,
}

/// A language-model backend
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a reply for one user message
    async fn generate(&self, request: &GenerateRequest) -> BackendOutcome<GenerateResponse>;

    /// Probe the backend's `/health` endpoint
    async fn health(&self) -> BackendOutcome<()>;
}
