//! Worker registry configuration.

use std::time::Duration;

use application::WorkerAuthPolicy;
use secrecy::SecretString;
use serde::Deserialize;

/// Worker registry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// Require the shared secret on registration
    #[serde(default)]
    pub require_auth: bool,

    /// Shared secret presented by workers (sensitive - uses `SecretString`)
    #[serde(default)]
    pub auth_token: Option<SecretString>,

    /// Workers not seen for this many seconds are evicted (0 = never)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// How often the eviction task runs
    #[serde(default = "default_eviction_interval_secs")]
    pub eviction_interval_secs: u64,
}

/// Longest accepted worker TTL (ten years)
pub const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

const fn default_ttl_secs() -> u64 {
    300
}

const fn default_eviction_interval_secs() -> u64 {
    60
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            require_auth: false,
            auth_token: None,
            ttl_secs: default_ttl_secs(),
            eviction_interval_secs: default_eviction_interval_secs(),
        }
    }
}

impl WorkerConfig {
    /// Registration gate built from this configuration
    pub fn auth_policy(&self) -> WorkerAuthPolicy {
        WorkerAuthPolicy {
            require_auth: self.require_auth,
            shared_secret: self.auth_token.clone(),
        }
    }

    /// Eviction TTL, `None` when eviction is disabled
    pub fn ttl(&self) -> Option<Duration> {
        (self.ttl_secs > 0).then(|| Duration::from_secs(self.ttl_secs))
    }

    pub const fn eviction_interval(&self) -> Duration {
        Duration::from_secs(self.eviction_interval_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.ttl_secs > MAX_TTL_SECS {
            return Err(format!("worker ttl must not exceed {MAX_TTL_SECS} seconds"));
        }
        if self.ttl_secs > 0 && self.eviction_interval_secs == 0 {
            return Err("worker eviction interval must be greater than zero".to_string());
        }
        Ok(())
    }
}
