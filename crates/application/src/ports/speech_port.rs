//! Speech port - Interface for the speech-to-text and speech-synthesis backends

use async_trait::async_trait;
use domain::BackendOutcome;
#[cfg(test)]
use mockall::automock;

/// Uploaded audio as received from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUpload {
    /// Raw audio bytes
    pub data: Vec<u8>,
    /// File name declared by the client
    pub filename: String,
    /// Content type declared by the client
    pub content_type: String,
}

impl AudioUpload {
    pub fn new(
        data: impl Into<Vec<u8>>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            filename: filename.into(),
            content_type: content_type.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Result of a transcription operation
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    /// Transcribed text
    pub text: String,
    /// Detected language code (e.g., "es", "en")
    pub language: Option<String>,
    /// Duration of the audio in seconds, if reported
    pub duration_seconds: Option<f64>,
}

/// Result of a speech synthesis operation
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    /// WAV file bytes
    pub audio_data: Vec<u8>,
    pub sample_rate: u32,
    pub duration_seconds: f64,
}

/// Port for speech-to-text operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechToTextPort: Send + Sync {
    /// Transcribe uploaded audio
    async fn transcribe(&self, audio: &AudioUpload) -> BackendOutcome<TranscriptionResult>;

    /// Probe the backend's health endpoint
    async fn health(&self) -> BackendOutcome<()>;
}

/// Port for speech synthesis operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextToSpeechPort: Send + Sync {
    /// Synthesize `text` with the named voice
    async fn synthesize(&self, text: &str, voice: &str) -> BackendOutcome<SynthesisResult>;

    /// Probe the backend's health endpoint
    async fn health(&self) -> BackendOutcome<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_upload() {
        assert!(AudioUpload::new(Vec::new(), "a.wav", "audio/wav").is_empty());
        assert!(!AudioUpload::new(vec![1], "a.wav", "audio/wav").is_empty());
    }
}
