//! Types for speech processing
//!
//! Contains data structures for uploaded audio, transcriptions and
//! synthesized speech.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::SpeechError;
use crate::wav;

/// Fallback content type for uploads that declare none
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded audio file as received from the client
#[derive(Debug, Clone)]
pub struct AudioData {
    data: Bytes,
    filename: String,
    content_type: String,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub fn new(
        data: impl Into<Bytes>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        let content_type = content_type.into();
        Self {
            data: data.into(),
            filename: filename.into(),
            content_type: if content_type.trim().is_empty() {
                DEFAULT_CONTENT_TYPE.to_string()
            } else {
                content_type
            },
        }
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// File name declared by the client
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Content type declared by the client
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Result of speech-to-text transcription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Detected language (ISO 639-1 code)
    #[serde(default)]
    pub language: Option<String>,
    /// Duration of the audio in seconds
    #[serde(default, alias = "duration")]
    pub duration_seconds: Option<f64>,
}

impl Transcription {
    /// Create a transcription with text only
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            duration_seconds: None,
        }
    }

    /// Set the detected language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Synthesized speech as a complete WAV file
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedSpeech {
    /// WAV file bytes
    pub audio: Vec<u8>,
    pub sample_rate: u32,
    pub duration_seconds: f64,
}

impl SynthesizedSpeech {
    /// Describe a WAV file, deriving rate and duration from its header
    pub fn from_wav(audio: Vec<u8>) -> Result<Self, SpeechError> {
        let info = wav::parse(&audio)?;
        Ok(Self {
            sample_rate: info.sample_rate,
            duration_seconds: info.duration_seconds(),
            audio,
        })
    }

    /// A silent mono 16-bit clip
    ///
    /// The reported duration is derived from the generated payload, not from
    /// the requested duration.
    #[must_use]
    pub fn silence(sample_rate: u32, duration_seconds: f64) -> Self {
        let audio = wav::silence(sample_rate, duration_seconds);
        let data_len = audio.len() - wav::HEADER_LEN;
        Self {
            duration_seconds: wav::pcm16_mono_duration(data_len, sample_rate),
            sample_rate,
            audio,
        }
    }
}
