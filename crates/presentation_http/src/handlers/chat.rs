//! Chat handler

use application::ChatEnvelope;
use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Chat request body
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    /// User message
    #[validate(length(min = 1, message = "message cannot be empty"))]
    pub message: String,
    /// Conversation to continue; generated when absent
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Forward a chat message to the language model
#[instrument(skip(state, request), fields(message_len = request.message.len()))]
pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatEnvelope>, ApiError> {
    let envelope = state
        .chat_service
        .chat(
            &request.message,
            request.conversation_id.as_deref(),
            request.user_id.as_deref(),
        )
        .await?;

    Ok(Json(envelope))
}
