//! Speech adapters - Implement the speech ports using the ai_speech clients

use std::sync::Arc;

use ai_speech::{
    AudioData, HttpSpeechToText, HttpTextToSpeech, SpeechConfig, SpeechError, SpeechToText,
    TextToSpeech,
};
use application::error::ApplicationError;
use application::ports::{
    AudioUpload, SpeechToTextPort, SynthesisResult, TextToSpeechPort, TranscriptionResult,
};
use async_trait::async_trait;
use domain::BackendOutcome;
use tracing::{debug, instrument};

fn map_error(err: SpeechError) -> ApplicationError {
    ApplicationError::Configuration(err.to_string())
}

/// Adapter for the speech-to-text backend
pub struct SpeechToTextAdapter {
    provider: Arc<dyn SpeechToText>,
}

impl std::fmt::Debug for SpeechToTextAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechToTextAdapter")
            .field("provider", &"dyn SpeechToText")
            .finish()
    }
}

impl SpeechToTextAdapter {
    /// Create an adapter backed by the HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &SpeechConfig) -> Result<Self, ApplicationError> {
        let provider = HttpSpeechToText::new(config).map_err(map_error)?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    /// Create an adapter over any speech-to-text provider
    pub fn with_provider(provider: Arc<dyn SpeechToText>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl SpeechToTextPort for SpeechToTextAdapter {
    #[instrument(skip(self, audio), fields(filename = %audio.filename, size = audio.data.len()))]
    async fn transcribe(&self, audio: &AudioUpload) -> BackendOutcome<TranscriptionResult> {
        let data = AudioData::new(
            audio.data.clone(),
            audio.filename.clone(),
            audio.content_type.clone(),
        );

        let outcome = self
            .provider
            .transcribe(&data)
            .await
            .map(|transcription| TranscriptionResult {
                text: transcription.text,
                language: transcription.language,
                duration_seconds: transcription.duration_seconds,
            });

        debug!(outcome = %outcome.kind(), "Transcription finished");
        outcome
    }

    async fn health(&self) -> BackendOutcome<()> {
        self.provider.health().await
    }
}

/// Adapter for the speech-synthesis backend
pub struct TextToSpeechAdapter {
    provider: Arc<dyn TextToSpeech>,
}

impl std::fmt::Debug for TextToSpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextToSpeechAdapter")
            .field("provider", &"dyn TextToSpeech")
            .field("default_voice", &self.provider.default_voice())
            .finish()
    }
}

impl TextToSpeechAdapter {
    /// Create an adapter backed by the HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: &SpeechConfig) -> Result<Self, ApplicationError> {
        let provider = HttpTextToSpeech::new(config).map_err(map_error)?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    /// Create an adapter over any speech-synthesis provider
    pub fn with_provider(provider: Arc<dyn TextToSpeech>) -> Self {
        Self { provider }
    }

    /// Voice used when a request names none
    pub fn default_voice(&self) -> &str {
        self.provider.default_voice()
    }
}

#[async_trait]
impl TextToSpeechPort for TextToSpeechAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = %voice))]
    async fn synthesize(&self, text: &str, voice: &str) -> BackendOutcome<SynthesisResult> {
        let outcome = self
            .provider
            .synthesize(text, voice)
            .await
            .map(|speech| SynthesisResult {
                audio_data: speech.audio,
                sample_rate: speech.sample_rate,
                duration_seconds: speech.duration_seconds,
            });

        debug!(outcome = %outcome.kind(), "Synthesis finished");
        outcome
    }

    async fn health(&self) -> BackendOutcome<()> {
        self.provider.health().await
    }
}

#[cfg(test)]
mod tests {
    use ai_speech::{SynthesizedSpeech, Transcription};

    use super::*;

    struct RecordingStt;

    #[async_trait]
    impl SpeechToText for RecordingStt {
        async fn transcribe(&self, audio: &AudioData) -> BackendOutcome<Transcription> {
            BackendOutcome::Success(
                Transcription::new(format!(
                    "{}:{}:{}",
                    audio.filename(),
                    audio.content_type(),
                    audio.size_bytes()
                ))
                .with_language("es"),
            )
        }

        async fn health(&self) -> BackendOutcome<()> {
            BackendOutcome::Success(())
        }
    }

    struct SilentTts;

    #[async_trait]
    impl TextToSpeech for SilentTts {
        async fn synthesize(&self, _text: &str, _voice: &str) -> BackendOutcome<SynthesizedSpeech> {
            BackendOutcome::Success(SynthesizedSpeech::silence(16_000, 0.5))
        }

        async fn health(&self) -> BackendOutcome<()> {
            BackendOutcome::Timeout
        }

        fn default_voice(&self) -> &str {
            "luz"
        }
    }

    #[tokio::test]
    async fn upload_becomes_audio_data() {
        let adapter = SpeechToTextAdapter::with_provider(Arc::new(RecordingStt));
        let upload = AudioUpload::new(vec![1, 2, 3], "note.ogg", "");

        let BackendOutcome::Success(result) = adapter.transcribe(&upload).await else {
            unreachable!("Expected Success");
        };

        assert_eq!(result.text, "note.ogg:application/octet-stream:3");
        assert_eq!(result.language.as_deref(), Some("es"));
        assert_eq!(result.duration_seconds, None);
    }

    #[tokio::test]
    async fn synthesized_speech_is_mapped() {
        let adapter = TextToSpeechAdapter::with_provider(Arc::new(SilentTts));

        let BackendOutcome::Success(result) = adapter.synthesize("hola", "luz").await else {
            unreachable!("Expected Success");
        };

        assert_eq!(result.sample_rate, 16_000);
        assert!((result.duration_seconds - 0.5).abs() < f64::EPSILON);
        assert_eq!(&result.audio_data[..4], b"RIFF");
        assert_eq!(adapter.default_voice(), "luz");
        assert_eq!(adapter.health().await, BackendOutcome::Timeout);
    }

    #[test]
    fn invalid_config_is_a_configuration_error() {
        let config = SpeechConfig {
            tts_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            TextToSpeechAdapter::new(&config),
            Err(ApplicationError::Configuration(_))
        ));
        assert!(matches!(
            SpeechToTextAdapter::new(&config),
            Err(ApplicationError::Configuration(_))
        ));
    }
}
