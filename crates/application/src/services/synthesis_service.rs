//! Synthesis service - forwards text to speech synthesis

use std::sync::Arc;

use chrono::Utc;
use domain::BackendKind;
use tracing::{debug, instrument};

use crate::envelope::SpeechEnvelope;
use crate::error::ApplicationError;
use crate::fallback::{FallbackPolicy, Resolution};
use crate::ports::TextToSpeechPort;

/// Service handling `/api/tts`
pub struct SynthesisService {
    tts: Arc<dyn TextToSpeechPort>,
    policy: FallbackPolicy,
    default_voice: String,
}

impl std::fmt::Debug for SynthesisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisService")
            .field("tts", &"<TextToSpeechPort>")
            .field("policy", &self.policy)
            .field("default_voice", &self.default_voice)
            .finish()
    }
}

impl SynthesisService {
    /// Create a new synthesis service
    pub fn new(
        tts: Arc<dyn TextToSpeechPort>,
        policy: FallbackPolicy,
        default_voice: impl Into<String>,
    ) -> Self {
        Self {
            tts,
            policy,
            default_voice: default_voice.into(),
        }
    }

    /// Voice used when a request names none
    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    /// Synthesize `text`; every backend failure becomes a silent clip
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
    ) -> Result<SpeechEnvelope, ApplicationError> {
        if text.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "text cannot be empty".to_string(),
            ));
        }

        let voice = voice
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.default_voice)
            .to_string();

        let outcome = self.tts.synthesize(text, &voice).await;

        match self.policy.resolve(BackendKind::SpeechSynthesis, outcome) {
            Resolution::Live(speech) => {
                debug!(
                    sample_rate = speech.sample_rate,
                    duration_seconds = speech.duration_seconds,
                    "Speech synthesized by backend"
                );
                Ok(SpeechEnvelope::live(&speech, text.to_string(), voice, Utc::now()))
            },
            Resolution::Fallback { note } => Ok(SpeechEnvelope::fallback(
                &self.policy.silent_speech(),
                text.to_string(),
                voice,
                note,
                Utc::now(),
            )),
            Resolution::Fail(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use domain::{BackendOutcome, Provenance};

    use super::*;
    use crate::ports::{MockTextToSpeechPort, SynthesisResult};

    fn service(mock: MockTextToSpeechPort) -> SynthesisService {
        SynthesisService::new(Arc::new(mock), FallbackPolicy::default(), "luz")
    }

    #[tokio::test]
    async fn blank_text_never_reaches_backend() {
        let mut mock = MockTextToSpeechPort::new();
        mock.expect_synthesize().times(0);

        let result = service(mock).synthesize("\n\t ", None).await;
        assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn default_voice_is_applied() {
        let mut mock = MockTextToSpeechPort::new();
        mock.expect_synthesize()
            .withf(|text, voice| text == "hola" && voice == "luz")
            .times(1)
            .returning(|_, _| {
                BackendOutcome::Success(SynthesisResult {
                    audio_data: b"RIFF".to_vec(),
                    sample_rate: 22_050,
                    duration_seconds: 0.5,
                })
            });

        let envelope = service(mock).synthesize("hola", Some("  ")).await.unwrap();
        assert_eq!(envelope.voice, "luz");
        assert_eq!(envelope.status, Provenance::Success);
        assert_eq!(envelope.sample_rate, 22_050);
        assert_eq!(envelope.audio, "UklGRg==");
    }

    #[tokio::test]
    async fn requested_voice_is_forwarded() {
        let mut mock = MockTextToSpeechPort::new();
        mock.expect_synthesize()
            .withf(|_, voice| voice == "sol")
            .times(1)
            .returning(|_, _| BackendOutcome::Unreachable);

        let envelope = service(mock).synthesize("hola", Some("sol")).await.unwrap();
        assert_eq!(envelope.voice, "sol");
    }

    #[tokio::test]
    async fn unreachable_backend_yields_silent_clip() {
        let mut mock = MockTextToSpeechPort::new();
        mock.expect_synthesize()
            .returning(|_, _| BackendOutcome::Unreachable);

        let envelope = service(mock).synthesize("hola", None).await.unwrap();

        assert_eq!(envelope.status, Provenance::Fallback);
        assert_eq!(envelope.sample_rate, 24_000);
        assert!((envelope.duration_seconds - 2.0).abs() < f64::EPSILON);
        assert_eq!(envelope.format, "wav");

        let wav = STANDARD.decode(&envelope.audio).unwrap();
        let payload = &wav[44..];
        assert_eq!(payload.len(), 24_000 * 2 * 2);
        assert!(payload.iter().all(|&b| b == 0));
        let derived = payload.len() as f64 / (f64::from(envelope.sample_rate) * 2.0);
        assert!((envelope.duration_seconds - derived).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn timeout_and_errors_also_fall_back() {
        for outcome in [
            BackendOutcome::Timeout,
            BackendOutcome::application_error(500, "boom"),
        ] {
            let mut mock = MockTextToSpeechPort::new();
            mock.expect_synthesize()
                .returning(move |_, _| outcome.clone());

            let envelope = service(mock).synthesize("hola", None).await.unwrap();
            assert_eq!(envelope.status, Provenance::Fallback);
        }
    }
}
