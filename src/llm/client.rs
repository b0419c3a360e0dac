//! Completion client trait and a scripted mock

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::GenerationError;
use crate::llm::types::ChatRequest;

/// Stateless completion client - each call is independent (fresh context)
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one request and return the first choice's message content
    async fn complete(&self, request: &ChatRequest) -> Result<String, GenerationError>;

    /// Model name placed in every request
    fn model(&self) -> &str;
}

/// Client that replays queued responses and records what it was asked.
#[derive(Debug, Default)]
pub struct MockCompletionClient {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.lock_responses().push_back(Ok(content.into()));
        self
    }

    /// Queue a failure
    pub fn with_error(self, error: GenerationError) -> Self {
        self.lock_responses().push_back(Err(error));
        self
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, GenerationError>>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, GenerationError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        self.lock_responses()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::InvalidResponse("no scripted response left".to_string())))
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let mock = MockCompletionClient::new()
            .with_response("first")
            .with_error(GenerationError::Network("down".to_string()));
        let request = ChatRequest::new("m", 0.7).with_user_message("hi");

        assert_eq!(mock.complete(&request).await.unwrap(), "first");
        assert!(matches!(mock.complete(&request).await, Err(GenerationError::Network(_))));
        assert!(matches!(
            mock.complete(&request).await,
            Err(GenerationError::InvalidResponse(_))
        ));
        assert_eq!(mock.requests().len(), 3);
    }

    #[test]
    fn test_mock_model_name() {
        assert_eq!(MockCompletionClient::new().model(), "mock-model");
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockCompletionClient>();
    }
}
