//! Application state shared across handlers

use std::{sync::Arc, time::Duration};

use application::{
    ApplicationError, ChatService, StatusService, SynthesisService, TranscriptionService,
    WorkerRegistry,
    ports::{InferencePort, SpeechToTextPort, TextToSpeechPort},
};
use infrastructure::{AppConfig, InferenceAdapter, SpeechToTextAdapter, TextToSpeechAdapter};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Chat forwarding to the language model
    pub chat_service: Arc<ChatService>,
    /// Transcription forwarding to speech-to-text
    pub transcription_service: Arc<TranscriptionService>,
    /// Synthesis forwarding to speech synthesis
    pub synthesis_service: Arc<SynthesisService>,
    /// Backend health probe
    pub status_service: Arc<StatusService>,
    /// Registered workers
    pub workers: Arc<WorkerRegistry>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the state with the HTTP backend adapters
    ///
    /// # Errors
    ///
    /// Returns an error if a backend client cannot be created.
    pub fn from_config(config: AppConfig) -> Result<Self, ApplicationError> {
        let stt = Arc::new(SpeechToTextAdapter::new(&config.speech)?);
        let inference = Arc::new(InferenceAdapter::new(config.inference.clone())?);
        let tts = Arc::new(TextToSpeechAdapter::new(&config.speech)?);

        Ok(Self::with_ports(config, stt, inference, tts))
    }

    /// Build the state over arbitrary port implementations
    pub fn with_ports(
        config: AppConfig,
        stt: Arc<dyn SpeechToTextPort>,
        inference: Arc<dyn InferencePort>,
        tts: Arc<dyn TextToSpeechPort>,
    ) -> Self {
        let policy = config.fallback.clone();
        let probe_timeout = Duration::from_secs(config.server.status_probe_timeout_secs);

        Self {
            chat_service: Arc::new(ChatService::new(Arc::clone(&inference), policy.clone())),
            transcription_service: Arc::new(TranscriptionService::new(
                Arc::clone(&stt),
                policy.clone(),
            )),
            synthesis_service: Arc::new(SynthesisService::new(
                Arc::clone(&tts),
                policy,
                config.speech.default_voice.clone(),
            )),
            status_service: Arc::new(
                StatusService::new(stt, inference, tts).with_probe_timeout(probe_timeout),
            ),
            workers: Arc::new(WorkerRegistry::new(config.workers.auth_policy())),
            config: Arc::new(config),
        }
    }
}
