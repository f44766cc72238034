//! The three downstream AI services the gateway forwards to

use std::fmt;

use serde::{Deserialize, Serialize};

/// A backend service the gateway can forward to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Speech-to-text (transcription)
    SpeechToText,
    /// Language model (chat)
    LanguageModel,
    /// Text-to-speech (synthesis)
    SpeechSynthesis,
}

impl BackendKind {
    /// All backends in probe order
    pub const ALL: [Self; 3] = [
        Self::SpeechToText,
        Self::LanguageModel,
        Self::SpeechSynthesis,
    ];

    /// Stable snake_case key used in JSON payloads and logs
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::SpeechToText => "speech_to_text",
            Self::LanguageModel => "language_model",
            Self::SpeechSynthesis => "speech_synthesis",
        }
    }

    /// Human-readable name, safe to show to API callers
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::SpeechToText => "speech recognition service",
            Self::LanguageModel => "language model service",
            Self::SpeechSynthesis => "speech synthesis service",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
