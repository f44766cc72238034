//! HTTP client for the remote LLM service

use std::time::Duration;

use async_trait::async_trait;
use domain::BackendOutcome;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::{InferenceError, transport_outcome};
use crate::ports::{GenerateRequest, GenerateResponse, LanguageModel};

/// Language-model backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpLanguageModel {
    client: Client,
    config: InferenceConfig,
}

impl HttpLanguageModel {
    /// Create a new client
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        config.validate().map_err(InferenceError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ClientBuild(e.to_string()))?;

        info!(
            base_url = %config.normalized_base_url(),
            timeout_ms = config.timeout_ms,
            "Initialized language model client"
        );

        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.normalized_base_url(),
            endpoint.trim_start_matches('/')
        )
    }
}

/// Turn a received response into an outcome, decoding a JSON body on 2xx
async fn read_json<T: DeserializeOwned>(response: Response) -> BackendOutcome<T> {
    let status = response.status();

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return transport_outcome(&e),
    };

    if !status.is_success() {
        return BackendOutcome::application_error(
            status.as_u16(),
            String::from_utf8_lossy(&bytes),
        );
    }

    match serde_json::from_slice(&bytes) {
        Ok(parsed) => BackendOutcome::Success(parsed),
        Err(e) => {
            warn!(error = %e, "LLM service returned an unparseable body");
            BackendOutcome::application_error(status.as_u16(), String::from_utf8_lossy(&bytes))
        },
    }
}

#[async_trait]
impl LanguageModel for HttpLanguageModel {
    #[instrument(skip(self, request), fields(conversation_id = %request.conversation_id))]
    async fn generate(&self, request: &GenerateRequest) -> BackendOutcome<GenerateResponse> {
        debug!(prompt_len = request.prompt.len(), "Sending request to LLM service");

        let outcome = match self
            .client
            .post(self.api_url("generate"))
            .json(request)
            .send()
            .await
        {
            Ok(response) => read_json(response).await,
            Err(e) => transport_outcome(&e),
        };

        match &outcome {
            BackendOutcome::Success(_) => debug!("LLM service answered"),
            BackendOutcome::ApplicationError { status, body } => {
                warn!(status, body_len = body.len(), "LLM service returned an error");
            },
            other => warn!(kind = %other.kind(), "LLM service not reachable"),
        }

        outcome
    }

    #[instrument(skip(self))]
    async fn health(&self) -> BackendOutcome<()> {
        match self
            .client
            .get(self.api_url("health"))
            .timeout(Duration::from_millis(self.config.health_timeout_ms))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => BackendOutcome::Success(()),
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                BackendOutcome::application_error(status, body)
            },
            Err(e) => transport_outcome(&e),
        }
    }
}
