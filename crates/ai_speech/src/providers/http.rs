//! HTTP clients for the speech-to-text and speech-synthesis services

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use domain::BackendOutcome;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::{SpeechError, transport_outcome};
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::{AudioData, SynthesizedSpeech, Transcription};

fn build_client(timeout_ms: u64) -> Result<Client, SpeechError> {
    Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .map_err(|e| SpeechError::ClientBuild(e.to_string()))
}

fn join(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint)
}

/// A received 2xx body together with its declared content type
struct SuccessBody {
    status: u16,
    content_type: Option<String>,
    bytes: Bytes,
}

/// Read the whole body, turning non-2xx statuses into an application error
async fn read_success<T>(response: Response) -> Result<SuccessBody, BackendOutcome<T>> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_ascii_lowercase);

    let bytes = response.bytes().await.map_err(|e| transport_outcome(&e))?;

    if status.is_success() {
        Ok(SuccessBody {
            status: status.as_u16(),
            content_type,
            bytes,
        })
    } else {
        Err(BackendOutcome::application_error(
            status.as_u16(),
            String::from_utf8_lossy(&bytes),
        ))
    }
}

async fn probe(client: &Client, url: String, timeout: Duration) -> BackendOutcome<()> {
    match client.get(url).timeout(timeout).send().await {
        Ok(response) if response.status().is_success() => BackendOutcome::Success(()),
        Ok(response) => {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            BackendOutcome::application_error(status, body)
        },
        Err(e) => transport_outcome(&e),
    }
}

fn log_outcome<T>(service: &str, outcome: &BackendOutcome<T>) {
    match outcome {
        BackendOutcome::Success(_) => debug!(service, "Speech service answered"),
        BackendOutcome::ApplicationError { status, body } => {
            warn!(service, status, body_len = body.len(), "Speech service returned an error");
        },
        other => warn!(service, kind = %other.kind(), "Speech service not reachable"),
    }
}

// =============================================================================
// Speech-to-text
// =============================================================================

/// Speech-to-text backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpSpeechToText {
    client: Client,
    base_url: String,
    health_timeout: Duration,
}

impl HttpSpeechToText {
    /// Create a new client
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        config.validate()?;
        let client = build_client(config.stt_timeout_ms)?;

        info!(
            base_url = %config.stt_base_url,
            timeout_ms = config.stt_timeout_ms,
            "Initialized speech-to-text client"
        );

        Ok(Self {
            client,
            base_url: config.stt_base_url.trim_end_matches('/').to_string(),
            health_timeout: Duration::from_millis(config.health_timeout_ms),
        })
    }

    fn upload_part(audio: &AudioData) -> Part {
        let part = || {
            Part::stream_with_length(Body::from(audio.data().clone()), audio.size_bytes() as u64)
                .file_name(audio.filename().to_string())
        };

        // An unparseable declared type is sent as a plain binary upload
        part()
            .mime_str(audio.content_type())
            .unwrap_or_else(|_| part())
    }
}

#[async_trait]
impl SpeechToText for HttpSpeechToText {
    #[instrument(skip(self, audio), fields(filename = %audio.filename(), size = audio.size_bytes()))]
    async fn transcribe(&self, audio: &AudioData) -> BackendOutcome<Transcription> {
        let form = Form::new().part("file", Self::upload_part(audio));

        let outcome = match self
            .client
            .post(join(&self.base_url, "transcribe"))
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => match read_success(response).await {
                Ok(body) => match serde_json::from_slice::<Transcription>(&body.bytes) {
                    Ok(transcription) => BackendOutcome::Success(transcription),
                    Err(e) => {
                        warn!(error = %e, "Speech-to-text service returned an unparseable body");
                        BackendOutcome::application_error(
                            body.status,
                            String::from_utf8_lossy(&body.bytes),
                        )
                    },
                },
                Err(outcome) => outcome,
            },
            Err(e) => transport_outcome(&e),
        };

        log_outcome("speech_to_text", &outcome);
        outcome
    }

    #[instrument(skip(self))]
    async fn health(&self) -> BackendOutcome<()> {
        probe(&self.client, join(&self.base_url, "health"), self.health_timeout).await
    }
}

// =============================================================================
// Speech synthesis
// =============================================================================

/// JSON flavour of a `/synthesize` reply
#[derive(Debug, Deserialize)]
struct SynthesizeReply {
    /// Base64 WAV
    audio: String,
}

/// Speech-synthesis backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpTextToSpeech {
    client: Client,
    base_url: String,
    default_voice: String,
    health_timeout: Duration,
}

impl HttpTextToSpeech {
    /// Create a new client
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        config.validate()?;
        let client = build_client(config.tts_timeout_ms)?;

        info!(
            base_url = %config.tts_base_url,
            timeout_ms = config.tts_timeout_ms,
            voice = %config.default_voice,
            "Initialized speech synthesis client"
        );

        Ok(Self {
            client,
            base_url: config.tts_base_url.trim_end_matches('/').to_string(),
            default_voice: config.default_voice.clone(),
            health_timeout: Duration::from_millis(config.health_timeout_ms),
        })
    }

    /// Extract WAV bytes from either a JSON or a raw audio reply
    fn decode_reply(body: &SuccessBody) -> Result<Vec<u8>, String> {
        let is_json = body
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"))
            || body.bytes.first() == Some(&b'{');

        if is_json {
            let reply: SynthesizeReply = serde_json::from_slice(&body.bytes)
                .map_err(|e| format!("invalid JSON reply: {e}"))?;
            STANDARD
                .decode(reply.audio.trim())
                .map_err(|e| format!("invalid base64 audio: {e}"))
        } else {
            Ok(body.bytes.to_vec())
        }
    }
}

#[async_trait]
impl TextToSpeech for HttpTextToSpeech {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %voice))]
    async fn synthesize(&self, text: &str, voice: &str) -> BackendOutcome<SynthesizedSpeech> {
        let outcome = match self
            .client
            .post(join(&self.base_url, "synthesize"))
            .json(&json!({ "text": text, "voice": voice }))
            .send()
            .await
        {
            Ok(response) => match read_success(response).await {
                Ok(body) => match Self::decode_reply(&body)
                    .and_then(|wav| SynthesizedSpeech::from_wav(wav).map_err(|e| e.to_string()))
                {
                    Ok(speech) => BackendOutcome::Success(speech),
                    Err(reason) => {
                        warn!(reason = %reason, "Speech synthesis service returned unusable audio");
                        BackendOutcome::application_error(body.status, reason)
                    },
                },
                Err(outcome) => outcome,
            },
            Err(e) => transport_outcome(&e),
        };

        log_outcome("speech_synthesis", &outcome);
        outcome
    }

    #[instrument(skip(self))]
    async fn health(&self) -> BackendOutcome<()> {
        probe(&self.client, join(&self.base_url, "health"), self.health_timeout).await
    }

    fn default_voice(&self) -> &str {
        &self.default_voice
    }
}
