//! Inference adapter - Implements InferencePort using the ai_core client

use std::sync::Arc;

use ai_core::{GenerateRequest, HttpLanguageModel, InferenceConfig, InferenceError, LanguageModel};
use application::error::ApplicationError;
use application::ports::{GenerationRequest, GenerationResult, InferencePort};
use async_trait::async_trait;
use domain::BackendOutcome;
use tracing::{debug, instrument};

/// Adapter for the language-model backend
pub struct InferenceAdapter {
    model: Arc<dyn LanguageModel>,
}

impl std::fmt::Debug for InferenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceAdapter")
            .field("model", &"dyn LanguageModel")
            .finish()
    }
}

impl InferenceAdapter {
    /// Create an adapter backed by the HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let model = HttpLanguageModel::new(config)
            .map_err(|e: InferenceError| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_model(Arc::new(model)))
    }

    /// Create an adapter over any language model
    pub fn with_model(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl InferencePort for InferenceAdapter {
    #[instrument(skip(self, request), fields(
        message_len = request.message.len(),
        conversation_id = %request.conversation_id
    ))]
    async fn generate(&self, request: &GenerationRequest) -> BackendOutcome<GenerationResult> {
        let outbound = GenerateRequest::new(&request.message, &request.conversation_id)
            .with_user(request.user_id.clone());

        let outcome = self.model.generate(&outbound).await.map(|reply| GenerationResult {
            response: reply.response,
            model: reply.model,
        });

        debug!(outcome = %outcome.kind(), "Generation finished");
        outcome
    }

    async fn health(&self) -> BackendOutcome<()> {
        self.model.health().await
    }
}
