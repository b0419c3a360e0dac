//! Chat-completion HTTP client
//!
//! Implements `CompletionClient` for any endpoint speaking the OpenAI-style
//! `chat/completions` protocol with bearer-token auth. One request per call:
//! no retries and no timeout beyond the transport default.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::config::Config;
use crate::error::GenerationError;
use crate::llm::client::CompletionClient;
use crate::llm::types::{ChatRequest, ChatResponse};

/// HTTP client for a chat-completion endpoint
pub struct ChatCompletionClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatCompletionClient {
    /// Create a client for `endpoint` authenticated with `api_key`
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .build()
            .map_err(|e| GenerationError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, endpoint, api_key, model))
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        Self::new(&config.api_endpoint, &config.api_key, &config.model)
    }

    /// Wrap an already-built `reqwest::Client`
    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Extract the first choice's content from a response body
    fn parse_response(body: &str) -> Result<String, GenerationError> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| GenerationError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        response
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| GenerationError::InvalidResponse("response contained no choices".to_string()))
    }

    /// POST the request and return the raw body of a 2xx response
    async fn send_request(&self, request: &ChatRequest) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Completion endpoint returned {}", status);
            return Err(GenerationError::Http {
                status: status.as_u16(),
                message: error_body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| GenerationError::Network(format!("Failed to read response: {}", e)))
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, GenerationError> {
        debug!("POST {} model={}", self.endpoint, request.model);
        let body = self.send_request(request).await?;
        Self::parse_response(&body)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for ChatCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}
