//! Application layer - Use cases and orchestration
//!
//! Contains the forwarding services, the fallback policy, response envelopes
//! and port definitions. Adapters in the infrastructure layer implement the
//! ports against the real backends.

pub mod envelope;
pub mod error;
pub mod fallback;
pub mod ports;
pub mod services;

pub use envelope::{ChatEnvelope, SpeechEnvelope, TranscriptionEnvelope};
pub use error::ApplicationError;
pub use fallback::{FallbackPolicy, Resolution};
pub use ports::*;
pub use services::*;
