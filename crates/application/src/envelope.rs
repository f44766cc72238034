//! Response envelopes
//!
//! Each operation has one envelope shape, produced identically for live and
//! fallback results. Optional fields serialize as `null` rather than being
//! omitted so the set of keys never depends on the path taken.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use domain::Provenance;
use serde::{Deserialize, Serialize};

use crate::ports::{AudioUpload, GenerationResult, SynthesisResult, TranscriptionResult};

/// Chat response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEnvelope {
    pub response: String,
    pub conversation_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: Provenance,
    pub model: Option<String>,
    pub note: Option<String>,
}

impl ChatEnvelope {
    pub fn live(result: GenerationResult, conversation_id: String, now: DateTime<Utc>) -> Self {
        Self {
            response: result.response,
            conversation_id,
            timestamp: now,
            status: Provenance::Success,
            model: result.model,
            note: None,
        }
    }

    pub fn fallback(
        response: String,
        conversation_id: String,
        note: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            response,
            conversation_id,
            timestamp: now,
            status: Provenance::Fallback,
            model: None,
            note: Some(note),
        }
    }
}

/// Transcription response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionEnvelope {
    pub text: String,
    pub status: Provenance,
    pub filename: String,
    pub content_type: String,
    pub language: Option<String>,
    pub duration_seconds: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
}

impl TranscriptionEnvelope {
    pub fn live(result: TranscriptionResult, upload: &AudioUpload, now: DateTime<Utc>) -> Self {
        Self {
            text: result.text,
            status: Provenance::Success,
            filename: upload.filename.clone(),
            content_type: upload.content_type.clone(),
            language: result.language,
            duration_seconds: result.duration_seconds,
            timestamp: now,
            note: None,
        }
    }

    pub fn fallback(text: String, upload: &AudioUpload, note: String, now: DateTime<Utc>) -> Self {
        Self {
            text,
            status: Provenance::Fallback,
            filename: upload.filename.clone(),
            content_type: upload.content_type.clone(),
            language: None,
            duration_seconds: None,
            timestamp: now,
            note: Some(note),
        }
    }
}

/// Audio container of every speech envelope
pub const SPEECH_FORMAT: &str = "wav";

/// Text-to-speech response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechEnvelope {
    /// Base64-encoded WAV file
    pub audio: String,
    pub text: String,
    pub voice: String,
    pub format: String,
    pub sample_rate: u32,
    pub duration_seconds: f64,
    pub status: Provenance,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
}

impl SpeechEnvelope {
    fn build(
        speech: &SynthesisResult,
        text: String,
        voice: String,
        status: Provenance,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            audio: STANDARD.encode(&speech.audio_data),
            text,
            voice,
            format: SPEECH_FORMAT.to_string(),
            sample_rate: speech.sample_rate,
            duration_seconds: speech.duration_seconds,
            status,
            timestamp: now,
            note,
        }
    }

    pub fn live(speech: &SynthesisResult, text: String, voice: String, now: DateTime<Utc>) -> Self {
        Self::build(speech, text, voice, Provenance::Success, None, now)
    }

    pub fn fallback(
        speech: &SynthesisResult,
        text: String,
        voice: String,
        note: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self::build(speech, text, voice, Provenance::Fallback, Some(note), now)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn keys(value: &serde_json::Value) -> BTreeSet<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-05-04T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn chat_envelope_shape_is_path_independent() {
        let live = ChatEnvelope::live(
            GenerationResult {
                response: "hi".to_string(),
                model: Some("m".to_string()),
            },
            "c1".to_string(),
            now(),
        );
        let fallback =
            ChatEnvelope::fallback("canned".to_string(), "c1".to_string(), "n".to_string(), now());

        let live = serde_json::to_value(&live).unwrap();
        let fallback = serde_json::to_value(&fallback).unwrap();
        assert_eq!(keys(&live), keys(&fallback));
        assert_eq!(live["status"], "success");
        assert_eq!(fallback["status"], "fallback");
        assert_eq!(live["timestamp"], "2026-05-04T10:00:00Z");
    }

    #[test]
    fn transcription_envelope_shape_is_path_independent() {
        let upload = AudioUpload::new(vec![1], "a.m4a", "audio/m4a");
        let live = TranscriptionEnvelope::live(
            TranscriptionResult {
                text: "hola".to_string(),
                language: Some("es".to_string()),
                duration_seconds: Some(1.0),
            },
            &upload,
            now(),
        );
        let fallback =
            TranscriptionEnvelope::fallback("x".to_string(), &upload, "n".to_string(), now());

        let live = serde_json::to_value(&live).unwrap();
        let fallback = serde_json::to_value(&fallback).unwrap();
        assert_eq!(keys(&live), keys(&fallback));
        assert_eq!(fallback["filename"], "a.m4a");
        assert_eq!(fallback["content_type"], "audio/m4a");
    }

    #[test]
    fn speech_envelope_encodes_audio() {
        let speech = SynthesisResult {
            audio_data: b"RIFF".to_vec(),
            sample_rate: 24_000,
            duration_seconds: 2.0,
        };
        let envelope = SpeechEnvelope::live(&speech, "hola".to_string(), "luz".to_string(), now());
        assert_eq!(envelope.audio, "UklGRg==");
        assert_eq!(envelope.format, "wav");

        let fallback = SpeechEnvelope::fallback(
            &speech,
            "hola".to_string(),
            "luz".to_string(),
            "n".to_string(),
            now(),
        );
        assert_eq!(
            keys(&serde_json::to_value(&envelope).unwrap()),
            keys(&serde_json::to_value(&fallback).unwrap())
        );
    }
}
