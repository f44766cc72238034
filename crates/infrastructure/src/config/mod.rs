//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `workers`: Worker registry auth and eviction
//!
//! Backend clients (`ai_core`, `ai_speech`) and the fallback policy
//! (`application`) own their config sections.

mod server;
mod workers;

use std::collections::HashMap;
use std::path::PathBuf;

use ai_core::InferenceConfig;
use ai_speech::SpeechConfig;
use application::FallbackPolicy;
use config::{ConfigError, File};
use serde::Deserialize;
use tracing::debug;

pub use server::ServerConfig;
pub use workers::WorkerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Environment prefix for sectioned overrides (`LUZ_GATEWAY__SERVER__PORT`)
pub const ENV_PREFIX: &str = "LUZ_GATEWAY";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "LUZ_GATEWAY_CONFIG";

/// Plain deployment variables and the config keys they override
const DEPLOYMENT_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("HOST", "server.host"),
    ("LOG_FORMAT", "server.log_format"),
    ("STT_SERVICE_URL", "speech.stt_base_url"),
    ("LLM_SERVICE_URL", "inference.base_url"),
    ("TTS_SERVICE_URL", "speech.tts_base_url"),
    ("WORKER_AUTH_TOKEN", "workers.auth_token"),
    ("REQUIRE_WORKER_AUTH", "workers.require_auth"),
];

/// Complete gateway configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Language-model backend
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Speech-to-text and speech-synthesis backends
    #[serde(default)]
    pub speech: SpeechConfig,

    /// When backend failures turn into fallbacks
    #[serde(default)]
    pub fallback: FallbackPolicy,

    /// Worker registry
    #[serde(default)]
    pub workers: WorkerConfig,
}

impl AppConfig {
    /// Load configuration from file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_from(&env)
    }

    /// Load configuration against an explicit environment map
    ///
    /// Layers, lowest priority first: defaults, `config.toml` (or the file
    /// named by `LUZ_GATEWAY_CONFIG`), `LUZ_GATEWAY__SECTION__KEY`
    /// variables, then the plain deployment variables (`PORT`, `HOST`, ...).
    pub fn load_from(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let file = match non_empty(env, CONFIG_PATH_ENV) {
            Some(path) => File::from(PathBuf::from(path)).required(true),
            None => File::with_name("config").required(false),
        };

        let sectioned: HashMap<String, String> = env
            .iter()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX) && key.as_str() != CONFIG_PATH_ENV)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let mut builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.log_format", "text")?
            // Load from file if exists
            .add_source(file)
            // Override with sectioned environment variables
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(sectioned)),
            );

        for (var, key) in DEPLOYMENT_OVERRIDES {
            if let Some(value) = non_empty(env, var) {
                debug!(variable = %var, key = %key, "Applying deployment override");
                builder = builder.set_override(*key, value)?;
            }
        }

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.normalize();
        config.validate().map_err(ConfigError::Message)?;
        Ok(config)
    }

    /// Strip trailing slashes from backend URLs
    fn normalize(&mut self) {
        for url in [
            &mut self.inference.base_url,
            &mut self.speech.stt_base_url,
            &mut self.speech.tts_base_url,
        ] {
            let trimmed = url.trim_end_matches('/').len();
            url.truncate(trimmed);
        }
        self.server.log_format = self.server.log_format.to_ascii_lowercase();
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.inference.validate()?;
        self.speech.validate().map_err(|e| e.to_string())?;
        self.fallback.validate()?;
        self.workers.validate()?;
        if self.workers.require_auth && self.workers.auth_token.is_none() {
            tracing::warn!(
                "Worker auth is required but no shared secret is configured; all registrations will be rejected"
            );
        }
        Ok(())
    }
}

fn non_empty<'a>(env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}
