//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let json_limit = DefaultBodyLimit::max(state.config.server.max_body_size_json_bytes);
    let audio_limit = DefaultBodyLimit::max(state.config.server.max_body_size_audio_bytes);

    Router::new()
        // Greeting, liveness and backend status
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/services/status",
            get(handlers::status::services_status),
        )
        // Forwarded AI operations
        .route("/api/chat", post(handlers::chat::chat).layer(json_limit))
        .route(
            "/api/transcribe",
            post(handlers::speech::transcribe).layer(audio_limit),
        )
        .route("/api/tts", post(handlers::speech::tts).layer(json_limit))
        // Worker registry
        .route(
            "/api/worker/register",
            post(handlers::workers::register_worker).layer(json_limit),
        )
        .route("/api/workers", get(handlers::workers::list_workers))
        .route(
            "/api/worker/heartbeat/{id}",
            post(handlers::workers::heartbeat),
        )
        .fallback(handlers::not_found)
        // Attach state
        .with_state(state)
}
