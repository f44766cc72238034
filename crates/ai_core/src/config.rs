//! Configuration for the language-model backend

use serde::{Deserialize, Serialize};

/// Configuration for the language-model backend client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the LLM service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for `/generate` in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Timeout for `/health` probes in milliseconds
    #[serde(default = "default_health_timeout_ms")]
    pub health_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8002".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000 // 30 seconds
}

const fn default_health_timeout_ms() -> u64 {
    5_000
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            health_timeout_ms: default_health_timeout_ms(),
        }
    }
}

impl InferenceConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err("LLM base URL must start with http:// or https://".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("LLM timeout must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Base URL without trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = InferenceConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8002");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.health_timeout_ms, 5_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_url() {
        let config = InferenceConfig {
            base_url: "localhost:8002".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = InferenceConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn normalized_base_url_strips_trailing_slash() {
        let config = InferenceConfig {
            base_url: "http://llm:8002/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.normalized_base_url(), "http://llm:8002");
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: InferenceConfig =
            serde_json::from_str(r#"{"base_url": "http://gpu:9000"}"#).unwrap();
        assert_eq!(config.base_url, "http://gpu:9000");
        assert_eq!(config.timeout_ms, 30_000);
    }
}
