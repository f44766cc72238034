//! Transcription service - forwards uploaded audio to speech recognition

use std::sync::Arc;

use chrono::Utc;
use domain::BackendKind;
use tracing::{debug, instrument};

use crate::envelope::TranscriptionEnvelope;
use crate::error::ApplicationError;
use crate::fallback::{FallbackPolicy, Resolution, TRANSCRIPTION_PLACEHOLDER};
use crate::ports::{AudioUpload, SpeechToTextPort};

/// Service handling `/api/transcribe`
pub struct TranscriptionService {
    stt: Arc<dyn SpeechToTextPort>,
    policy: FallbackPolicy,
}

impl std::fmt::Debug for TranscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionService")
            .field("stt", &"<SpeechToTextPort>")
            .field("policy", &self.policy)
            .finish()
    }
}

impl TranscriptionService {
    /// Create a new transcription service
    pub fn new(stt: Arc<dyn SpeechToTextPort>, policy: FallbackPolicy) -> Self {
        Self { stt, policy }
    }

    /// Transcribe one upload
    ///
    /// Empty audio is rejected before the backend is called.
    #[instrument(skip(self, upload), fields(filename = %upload.filename, size = upload.data.len()))]
    pub async fn transcribe(
        &self,
        upload: AudioUpload,
    ) -> Result<TranscriptionEnvelope, ApplicationError> {
        if upload.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "audio file is empty".to_string(),
            ));
        }

        let outcome = self.stt.transcribe(&upload).await;

        match self.policy.resolve(BackendKind::SpeechToText, outcome) {
            Resolution::Live(result) => {
                debug!(text_len = result.text.len(), "Transcription answered by backend");
                Ok(TranscriptionEnvelope::live(result, &upload, Utc::now()))
            },
            Resolution::Fallback { note } => Ok(TranscriptionEnvelope::fallback(
                TRANSCRIPTION_PLACEHOLDER.to_string(),
                &upload,
                note,
                Utc::now(),
            )),
            Resolution::Fail(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::{BackendOutcome, Provenance};

    use super::*;
    use crate::ports::{MockSpeechToTextPort, TranscriptionResult};

    fn upload() -> AudioUpload {
        AudioUpload::new(vec![0x52, 0x49, 0x46, 0x46], "nota.wav", "audio/wav")
    }

    #[tokio::test]
    async fn empty_audio_never_reaches_backend() {
        let mut mock = MockSpeechToTextPort::new();
        mock.expect_transcribe().times(0);

        let service = TranscriptionService::new(Arc::new(mock), FallbackPolicy::default());
        let result = service
            .transcribe(AudioUpload::new(Vec::new(), "empty.wav", "audio/wav"))
            .await;

        assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn live_transcription() {
        let mut mock = MockSpeechToTextPort::new();
        mock.expect_transcribe()
            .withf(|audio| audio.filename == "nota.wav" && audio.data.len() == 4)
            .times(1)
            .returning(|_| {
                BackendOutcome::Success(TranscriptionResult {
                    text: "hola mundo".to_string(),
                    language: Some("es".to_string()),
                    duration_seconds: Some(1.2),
                })
            });

        let service = TranscriptionService::new(Arc::new(mock), FallbackPolicy::default());
        let envelope = service.transcribe(upload()).await.unwrap();

        assert_eq!(envelope.text, "hola mundo");
        assert_eq!(envelope.status, Provenance::Success);
        assert_eq!(envelope.filename, "nota.wav");
        assert_eq!(envelope.content_type, "audio/wav");
        assert_eq!(envelope.language.as_deref(), Some("es"));
    }

    #[tokio::test]
    async fn backend_error_yields_placeholder() {
        let mut mock = MockSpeechToTextPort::new();
        mock.expect_transcribe()
            .returning(|_| BackendOutcome::application_error(415, "unsupported"));

        let service = TranscriptionService::new(Arc::new(mock), FallbackPolicy::default());
        let envelope = service.transcribe(upload()).await.unwrap();

        assert_eq!(envelope.text, TRANSCRIPTION_PLACEHOLDER);
        assert_eq!(envelope.status, Provenance::Fallback);
        assert_eq!(envelope.filename, "nota.wav");
    }

    #[tokio::test]
    async fn timeout_surfaces_by_default() {
        let mut mock = MockSpeechToTextPort::new();
        mock.expect_transcribe().returning(|_| BackendOutcome::Timeout);

        let service = TranscriptionService::new(Arc::new(mock), FallbackPolicy::default());
        let result = service.transcribe(upload()).await;

        assert!(matches!(
            result,
            Err(ApplicationError::BackendTimeout(BackendKind::SpeechToText))
        ));
    }

    #[tokio::test]
    async fn unreachable_surfaces_by_default() {
        let mut mock = MockSpeechToTextPort::new();
        mock.expect_transcribe().returning(|_| BackendOutcome::Unreachable);

        let service = TranscriptionService::new(Arc::new(mock), FallbackPolicy::default());
        let result = service.transcribe(upload()).await;

        assert!(matches!(
            result,
            Err(ApplicationError::BackendUnavailable(BackendKind::SpeechToText))
        ));
    }

    #[tokio::test]
    async fn lenient_policy_absorbs_transport_failures() {
        let mut mock = MockSpeechToTextPort::new();
        mock.expect_transcribe().returning(|_| BackendOutcome::Unreachable);

        let policy = FallbackPolicy {
            transcription_on_transport_failure: true,
            ..Default::default()
        };
        let service = TranscriptionService::new(Arc::new(mock), policy);
        let envelope = service.transcribe(upload()).await.unwrap();

        assert_eq!(envelope.status, Provenance::Fallback);
        assert_eq!(envelope.text, TRANSCRIPTION_PLACEHOLDER);
    }
}
