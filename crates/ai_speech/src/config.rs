//! Configuration for the speech backends

use serde::{Deserialize, Serialize};

use crate::error::SpeechError;

/// Configuration for the speech-to-text and speech-synthesis clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Base URL of the speech-to-text service
    #[serde(default = "default_stt_base_url")]
    pub stt_base_url: String,

    /// Timeout for `/transcribe` in milliseconds
    #[serde(default = "default_stt_timeout_ms")]
    pub stt_timeout_ms: u64,

    /// Base URL of the speech-synthesis service
    #[serde(default = "default_tts_base_url")]
    pub tts_base_url: String,

    /// Timeout for `/synthesize` in milliseconds
    #[serde(default = "default_tts_timeout_ms")]
    pub tts_timeout_ms: u64,

    /// Voice used when a request does not name one
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Timeout for `/health` probes in milliseconds
    #[serde(default = "default_health_timeout_ms")]
    pub health_timeout_ms: u64,
}

fn default_stt_base_url() -> String {
    "http://127.0.0.1:8001".to_string()
}

const fn default_stt_timeout_ms() -> u64 {
    60_000 // audio decoding is slow
}

fn default_tts_base_url() -> String {
    "http://127.0.0.1:8003".to_string()
}

const fn default_tts_timeout_ms() -> u64 {
    30_000
}

pub(crate) fn default_voice() -> String {
    "luz".to_string()
}

const fn default_health_timeout_ms() -> u64 {
    5_000
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_base_url: default_stt_base_url(),
            stt_timeout_ms: default_stt_timeout_ms(),
            tts_base_url: default_tts_base_url(),
            tts_timeout_ms: default_tts_timeout_ms(),
            default_voice: default_voice(),
            health_timeout_ms: default_health_timeout_ms(),
        }
    }
}

impl SpeechConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SpeechError> {
        for (name, url) in [("STT", &self.stt_base_url), ("TTS", &self.tts_base_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(SpeechError::Configuration(format!(
                    "{name} base URL must start with http:// or https://"
                )));
            }
        }
        if self.stt_timeout_ms == 0 || self.tts_timeout_ms == 0 {
            return Err(SpeechError::Configuration(
                "speech timeouts must be greater than zero".to_string(),
            ));
        }
        if self.default_voice.trim().is_empty() {
            return Err(SpeechError::Configuration(
                "default voice must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
