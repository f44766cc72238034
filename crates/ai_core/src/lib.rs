//! AI Core - language-model backend client
//!
//! Talks to the remote LLM service over HTTP (`POST /generate`, `GET /health`)
//! and classifies every call into a [`domain::BackendOutcome`].

pub mod client;
pub mod config;
pub mod error;
pub mod ports;

pub use client::HttpLanguageModel;
pub use config::InferenceConfig;
pub use error::InferenceError;
pub use ports::{GenerateRequest, GenerateResponse, LanguageModel};
