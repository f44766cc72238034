//! Luz gateway HTTP presentation layer
//!
//! This crate provides the HTTP API of the Luz Assistant Cloud gateway.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod tasks;

pub use error::ApiError;
pub use middleware::ValidatedJson;
pub use routes::create_router;
pub use state::AppState;
pub use tasks::spawn_worker_eviction_task;
