//! LLM client trait and request types
//!
//! Each call is independent: one request in, one text completion out. The
//! planner and the autonomous reasoner both sit on top of this trait so
//! tests can substitute a mock without touching the network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{McpMathError, Result};

/// Role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Everything needed for one completion call
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub system: String,
    pub messages: Vec<Message>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a new completion request with a system prompt
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            ..Default::default()
        }
    }

    /// Add a message to the request
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add a user message
    pub fn with_user_message(self, content: impl Into<String>) -> Self {
        self.with_message(Message::user(content))
    }

    /// Override the configured model for this call
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Stateless LLM client - each call is independent
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single completion request, returning the assistant's text
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Scripted client for tests: pops queued responses in order
pub struct MockLlmClient {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmClient {
    /// Create a mock that answers the next call with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_responses([response.into()])
    }

    /// Create a mock with a queue of responses, one per call
    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests captured so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let mut responses = self
            .responses
            .lock()
            .map_err(|_| McpMathError::Llm("mock response queue poisoned".to_string()))?;
        responses
            .pop_front()
            .ok_or_else(|| McpMathError::Llm("mock client ran out of responses".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("be helpful")
            .with_user_message("hello")
            .with_model("gpt-4.1")
            .with_max_tokens(100)
            .with_temperature(0.0);

        assert_eq!(request.system, "be helpful");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.model.as_deref(), Some("gpt-4.1"));
        assert_eq!(request.max_tokens, Some(100));
        assert_eq!(request.temperature, Some(0.0));
    }

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::assistant("hello").role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_mock_client_pops_responses_in_order() {
        let mock = MockLlmClient::with_responses(["one".to_string(), "two".to_string()]);

        let first = mock.complete(CompletionRequest::new("sys")).await.unwrap();
        let second = mock.complete(CompletionRequest::new("sys")).await.unwrap();
        assert_eq!(first, "one");
        assert_eq!(second, "two");

        let exhausted = mock.complete(CompletionRequest::new("sys")).await;
        assert!(exhausted.is_err());
    }

    #[tokio::test]
    async fn test_mock_client_records_requests() {
        let mock = MockLlmClient::new("ack");
        mock.complete(CompletionRequest::new("sys").with_user_message("ping"))
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].content, "ping");
    }
}
