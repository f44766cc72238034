//! Marker telling a live backend result from a gateway-made substitute

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the content of a response envelope came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Produced by the real backend
    Success,
    /// Synthesized by the gateway because the backend failed
    Fallback,
}

impl Provenance {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}
