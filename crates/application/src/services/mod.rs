//! Application services - Use case implementations

mod chat_service;
mod status_service;
mod synthesis_service;
mod transcription_service;
mod worker_registry;

pub use chat_service::ChatService;
pub use status_service::{
    BackendStatuses, ProbeStatus, ServiceStatus, StatusReport, StatusService,
};
pub use synthesis_service::SynthesisService;
pub use transcription_service::TranscriptionService;
pub use worker_registry::{WorkerAuthPolicy, WorkerRegistry};
