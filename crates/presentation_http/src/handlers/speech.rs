//! Transcription and speech synthesis handlers

use application::{AudioUpload, SpeechEnvelope, TranscriptionEnvelope};
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{Field, MultipartRejection},
    },
};
use serde::Deserialize;
use tracing::{debug, instrument};
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Content type assumed when the client declares none
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// File name assumed when the client declares none
const DEFAULT_FILENAME: &str = "audio";

/// Rank of a multipart field as the audio upload; lower wins
fn field_rank(field: &Field<'_>) -> Option<u8> {
    match field.name() {
        Some("file") => Some(0),
        Some("audio") => Some(1),
        _ if field.file_name().is_some() => Some(2),
        _ => None,
    }
}

/// Pick the audio part out of a multipart body
///
/// `file` wins over `audio`, which wins over any other part carrying a
/// file name.
async fn read_upload(multipart: &mut Multipart) -> Result<AudioUpload, ApiError> {
    let mut best: Option<(u8, AudioUpload)> = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(rank) = field_rank(&field) else {
            continue;
        };
        if best.as_ref().is_some_and(|(current, _)| *current <= rank) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        let content_type = field
            .content_type()
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = field.bytes().await?;

        best = Some((rank, AudioUpload::new(data.to_vec(), filename, content_type)));
        if rank == 0 {
            break;
        }
    }

    best.map(|(_, upload)| upload)
        .ok_or_else(|| ApiError::BadRequest("no audio file provided".to_string()))
}

/// Forward uploaded audio to speech-to-text
#[instrument(skip(state, multipart))]
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionEnvelope>, ApiError> {
    let mut multipart = multipart?;
    let upload = read_upload(&mut multipart).await?;

    debug!(
        filename = %upload.filename,
        content_type = %upload.content_type,
        size = upload.data.len(),
        "Received audio upload"
    );

    let envelope = state.transcription_service.transcribe(upload).await?;
    Ok(Json(envelope))
}

/// Speech synthesis request body
#[derive(Debug, Deserialize, Validate)]
pub struct TtsRequest {
    /// Text to speak
    #[validate(length(min = 1, message = "text cannot be empty"))]
    pub text: String,
    /// Voice name; the configured default when absent or blank
    #[serde(default)]
    pub voice: Option<String>,
}

/// Forward text to speech synthesis
#[instrument(skip(state, request), fields(text_len = request.text.len()))]
pub async fn tts(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TtsRequest>,
) -> Result<Json<SpeechEnvelope>, ApiError> {
    let envelope = state
        .synthesis_service
        .synthesize(&request.text, request.voice.as_deref())
        .await?;

    Ok(Json(envelope))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tts_request_voice_is_optional() {
        let request: TtsRequest = serde_json::from_str(r#"{"text": "hola"}"#).unwrap();
        assert_eq!(request.text, "hola");
        assert!(request.voice.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn tts_request_rejects_empty_text() {
        let request: TtsRequest = serde_json::from_str(r#"{"text": ""}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
