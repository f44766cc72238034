//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! `ai_core` and `ai_speech` HTTP clients, and loads the gateway
//! configuration.

pub mod adapters;
pub mod config;

pub use adapters::*;
pub use config::{AppConfig, ServerConfig, WorkerConfig};
