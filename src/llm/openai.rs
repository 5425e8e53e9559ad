//! OpenAI API client implementation
//!
//! Implements the LlmClient trait for the OpenAI chat completions API.
//! Credentials come from the OPENAI_API_KEY environment variable; their
//! absence is a detectable state, not an error, so callers can choose a
//! fallback path before ever constructing a client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::config::LlmConfig;
use crate::error::{McpMathError, Result};
use crate::llm::client::{CompletionRequest, LlmClient, Role};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default model
const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Default API base URL
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Configuration for the OpenAI client
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub model: String,
    pub api_base: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            max_tokens: 400,
            timeout: Duration::from_secs(45),
        }
    }
}

impl From<&LlmConfig> for OpenAiConfig {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

/// OpenAI chat completions client
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Check whether credentials are configured
    pub fn available() -> bool {
        std::env::var(API_KEY_ENV).map(|key| !key.is_empty()).unwrap_or(false)
    }

    /// Create a new client, reading OPENAI_API_KEY from the environment
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| McpMathError::Config(format!("{} not set", API_KEY_ENV)))?;

        Self::with_api_key(api_key, config)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(api_key: String, config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| McpMathError::Llm(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base)
    }

    /// Build the request body for the chat completions API
    fn build_request(&self, request: &CompletionRequest) -> Value {
        let model = request.model.as_ref().unwrap_or(&self.config.model).clone();
        let max_tokens = request.max_tokens.unwrap_or(self.config.max_tokens);

        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if !request.system.is_empty() {
            messages.push(json!({ "role": "system", "content": request.system }));
        }
        for message in &request.messages {
            messages.push(json!({
                "role": match message.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                "content": message.content
            }));
        }

        let mut body = json!({
            "model": model,
            "max_tokens": max_tokens,
            "messages": messages
        });

        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }

    /// Extract the first choice's message content from a response body
    fn parse_response(body: &Value) -> Result<String> {
        let content = body
            .pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .ok_or_else(|| McpMathError::Llm("Response did not include message content".to_string()))?;

        let content = content.trim();
        if content.is_empty() {
            return Err(McpMathError::Llm("Response content was empty".to_string()));
        }
        Ok(content.to_string())
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let body = self.build_request(&request);
        log::debug!("OpenAI request to {} (model {})", self.endpoint(), body["model"]);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| McpMathError::Llm(format!("Request failed: {}", e)))?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| McpMathError::Llm(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = payload
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown API error");
            return Err(McpMathError::Llm(format!("API error {}: {}", status.as_u16(), message)));
        }

        Self::parse_response(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiClient {
        OpenAiClient::with_api_key("test-key".to_string(), OpenAiConfig::default()).unwrap()
    }

    #[test]
    fn test_build_request_basic() {
        let request = CompletionRequest::new("You are a planner.").with_user_message("add 2 and 3");
        let body = client().build_request(&request);

        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["max_tokens"], 400);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "add 2 and 3");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_build_request_overrides() {
        let request = CompletionRequest::new("sys")
            .with_user_message("hi")
            .with_model("gpt-4.1")
            .with_max_tokens(64)
            .with_temperature(0.0);
        let body = client().build_request(&request);

        assert_eq!(body["model"], "gpt-4.1");
        assert_eq!(body["max_tokens"], 64);
        assert_eq!(body["temperature"], 0.0);
    }

    #[test]
    fn test_build_request_without_system() {
        let request = CompletionRequest::default().with_user_message("hi");
        let body = client().build_request(&request);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[test]
    fn test_parse_response_content() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "  5  "}}]
        });
        assert_eq!(OpenAiClient::parse_response(&body).unwrap(), "5");
    }

    #[test]
    fn test_parse_response_missing_content() {
        let body = json!({"choices": []});
        assert!(OpenAiClient::parse_response(&body).is_err());
    }

    #[test]
    fn test_parse_response_empty_content() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": ""}}]
        });
        assert!(OpenAiClient::parse_response(&body).is_err());
    }

    #[test]
    fn test_config_from_llm_config() {
        let llm = LlmConfig {
            model: "gpt-4.1".to_string(),
            api_base: "https://example.test/v1/".to_string(),
            max_tokens: 128,
            timeout_ms: 10_000,
        };
        let config = OpenAiConfig::from(&llm);
        assert_eq!(config.api_base, "https://example.test/v1");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            client().endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
