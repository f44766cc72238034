//! Chat service - forwards a user message to the language model

use std::sync::Arc;

use chrono::Utc;
use domain::BackendKind;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::envelope::ChatEnvelope;
use crate::error::ApplicationError;
use crate::fallback::{self, FallbackPolicy, Resolution};
use crate::ports::{GenerationRequest, InferencePort};

/// Service handling `/api/chat`
pub struct ChatService {
    inference: Arc<dyn InferencePort>,
    policy: FallbackPolicy,
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("inference", &"<InferencePort>")
            .field("policy", &self.policy)
            .finish()
    }
}

impl ChatService {
    /// Create a new chat service
    pub fn new(inference: Arc<dyn InferencePort>, policy: FallbackPolicy) -> Self {
        Self { inference, policy }
    }

    /// Answer one message
    ///
    /// A blank `message` is rejected before the backend is called. A missing
    /// or blank `conversation_id` is replaced by a fresh UUID.
    #[instrument(skip(self, message, user_id), fields(message_len = message.len()))]
    pub async fn chat(
        &self,
        message: &str,
        conversation_id: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<ChatEnvelope, ApplicationError> {
        if message.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "message cannot be empty".to_string(),
            ));
        }

        let conversation_id = conversation_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map_or_else(|| Uuid::new_v4().to_string(), ToString::to_string);

        let request = GenerationRequest {
            message: message.to_string(),
            conversation_id: conversation_id.clone(),
            user_id: user_id.map(ToString::to_string),
        };

        let outcome = self.inference.generate(&request).await;

        match self.policy.resolve(BackendKind::LanguageModel, outcome) {
            Resolution::Live(result) => {
                debug!(response_len = result.response.len(), "Chat answered by backend");
                Ok(ChatEnvelope::live(result, conversation_id, Utc::now()))
            },
            Resolution::Fallback { note } => Ok(ChatEnvelope::fallback(
                fallback::chat_reply(message),
                conversation_id,
                note,
                Utc::now(),
            )),
            Resolution::Fail(err) => Err(err),
        }
    }
}
