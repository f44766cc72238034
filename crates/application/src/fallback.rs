//! Fallback synthesizer and per-operation fallback policy
//!
//! Produces deterministic substitutes when a backend fails and decides, per
//! backend, whether a failure is absorbed into a fallback or surfaced.

use ai_speech::SynthesizedSpeech;
use domain::{BackendKind, BackendOutcome, OutcomeKind};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApplicationError;
use crate::ports::SynthesisResult;

/// Placeholder transcript returned when speech recognition is unavailable
pub const TRANSCRIPTION_PLACEHOLDER: &str =
    "[Transcription unavailable: the speech recognition service is offline]";

/// Default sample rate of the silent fallback clip
pub const DEFAULT_FALLBACK_SAMPLE_RATE: u32 = 24_000;

/// Default duration of the silent fallback clip
pub const DEFAULT_FALLBACK_DURATION_SECS: f64 = 2.0;

/// Which failures are absorbed into a fallback
///
/// Backend application errors always fall back. Speech synthesis falls back
/// on every failure. Chat and transcription are configurable for transport
/// failures (timeout, unreachable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackPolicy {
    /// Answer chat with a canned reply when the LLM cannot be reached
    #[serde(default = "default_chat_on_transport_failure")]
    pub chat_on_transport_failure: bool,

    /// Answer with the placeholder transcript when STT cannot be reached
    #[serde(default)]
    pub transcription_on_transport_failure: bool,

    /// Sample rate of the silent clip (Hz)
    #[serde(default = "default_tts_sample_rate")]
    pub tts_sample_rate: u32,

    /// Duration of the silent clip (seconds)
    #[serde(default = "default_tts_duration_seconds")]
    pub tts_duration_seconds: f64,
}

const fn default_chat_on_transport_failure() -> bool {
    true
}

const fn default_tts_sample_rate() -> u32 {
    DEFAULT_FALLBACK_SAMPLE_RATE
}

const fn default_tts_duration_seconds() -> f64 {
    DEFAULT_FALLBACK_DURATION_SECS
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            chat_on_transport_failure: default_chat_on_transport_failure(),
            transcription_on_transport_failure: false,
            tts_sample_rate: default_tts_sample_rate(),
            tts_duration_seconds: default_tts_duration_seconds(),
        }
    }
}

/// What a service should do with a backend outcome
#[derive(Debug)]
pub enum Resolution<T> {
    /// Use the backend payload
    Live(T),
    /// Produce a substitute; `note` is safe to show to callers
    Fallback { note: String },
    /// Surface the failure
    Fail(ApplicationError),
}

impl FallbackPolicy {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tts_sample_rate == 0 {
            return Err("fallback sample rate must be greater than zero".to_string());
        }
        if !self.tts_duration_seconds.is_finite() || self.tts_duration_seconds <= 0.0 {
            return Err("fallback duration must be a positive number of seconds".to_string());
        }
        Ok(())
    }

    /// Whether a transport failure of `kind` is absorbed
    pub const fn absorbs_transport_failure(&self, kind: BackendKind) -> bool {
        match kind {
            BackendKind::LanguageModel => self.chat_on_transport_failure,
            BackendKind::SpeechToText => self.transcription_on_transport_failure,
            BackendKind::SpeechSynthesis => true,
        }
    }

    /// Decide between the live payload, a fallback and an error
    pub fn resolve<T>(&self, kind: BackendKind, outcome: BackendOutcome<T>) -> Resolution<T> {
        let outcome_kind = outcome.kind();
        match outcome {
            BackendOutcome::Success(payload) => Resolution::Live(payload),
            BackendOutcome::ApplicationError { status, .. } => {
                warn!(backend = %kind.key(), outcome = %outcome_kind, status, "Serving fallback");
                Resolution::Fallback {
                    note: fallback_note(kind, outcome_kind),
                }
            },
            BackendOutcome::Timeout | BackendOutcome::Unreachable
                if self.absorbs_transport_failure(kind) =>
            {
                warn!(backend = %kind.key(), outcome = %outcome_kind, "Serving fallback");
                Resolution::Fallback {
                    note: fallback_note(kind, outcome_kind),
                }
            },
            BackendOutcome::Timeout => {
                warn!(backend = %kind.key(), "Backend timed out, no fallback");
                Resolution::Fail(ApplicationError::BackendTimeout(kind))
            },
            BackendOutcome::Unreachable => {
                warn!(backend = %kind.key(), "Backend unreachable, no fallback");
                Resolution::Fail(ApplicationError::BackendUnavailable(kind))
            },
        }
    }

    /// The silent clip served when synthesis fails
    pub fn silent_speech(&self) -> SynthesisResult {
        let speech = SynthesizedSpeech::silence(self.tts_sample_rate, self.tts_duration_seconds);
        SynthesisResult {
            audio_data: speech.audio,
            sample_rate: speech.sample_rate,
            duration_seconds: speech.duration_seconds,
        }
    }
}

/// Canned chat reply embedding the user's message verbatim
pub fn chat_reply(message: &str) -> String {
    format!(
        "I received your message: \"{message}\". The AI servers are offline right now, \
         so this is an automatic reply. Please try again in a few minutes."
    )
}

/// Human-readable reason for a fallback; never contains URLs or bodies
pub fn fallback_note(kind: BackendKind, outcome: OutcomeKind) -> String {
    let name = kind.display_name();
    match outcome {
        OutcomeKind::Timeout => {
            format!("The {name} did not respond in time; this is an automatic fallback.")
        },
        OutcomeKind::Unreachable => {
            format!("The {name} is offline; this is an automatic fallback.")
        },
        OutcomeKind::ApplicationError | OutcomeKind::Success => {
            format!("The {name} returned an error; this is an automatic fallback.")
        },
    }
}
