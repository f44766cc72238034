//! Port definitions for the speech backends
//!
//! Defines the traits (ports) that speech backend clients must implement.

use async_trait::async_trait;
use domain::BackendOutcome;

use crate::types::{AudioData, SynthesizedSpeech, Transcription};

/// Port for Speech-to-Text (STT) backends
///
/// # Example
///
/// ```ignore
/// use ai_speech::{AudioData, SpeechToText};
/// use domain::BackendOutcome;
///
/// async fn transcribe_voice_note(stt: &impl SpeechToText, audio: AudioData) -> Option<String> {
///     match stt.transcribe(&audio).await {
///         BackendOutcome::Success(t) => Some(t.text),
///         _ => None,
///     }
/// }
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Forward audio to the backend and classify the result
    async fn transcribe(&self, audio: &AudioData) -> BackendOutcome<Transcription>;

    /// Probe the backend's `/health` endpoint
    async fn health(&self) -> BackendOutcome<()>;
}

/// Port for Text-to-Speech (TTS) backends
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize `text` with `voice`
    ///
    /// A success always carries a WAV file whose rate and duration were read
    /// from its header.
    async fn synthesize(&self, text: &str, voice: &str) -> BackendOutcome<SynthesizedSpeech>;

    /// Probe the backend's `/health` endpoint
    async fn health(&self) -> BackendOutcome<()>;

    /// Voice used when the caller names none
    fn default_voice(&self) -> &str;
}
