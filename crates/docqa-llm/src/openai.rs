//! OpenAI-compatible chat-completions provider
//!
//! Talks to any endpoint speaking the chat-completions API shape. The
//! prompt instructs the model to cite the source documents by name; those
//! citations arrive inline in the answer text, and the pipeline passes them
//! through without verification.
//!
//! There is no retry logic here: a failed or timed-out call surfaces as an
//! error and the caller decides whether to retry.
//!
//! # Examples
//!
//! ```no_run
//! use docqa_llm::ChatProvider;
//!
//! let provider = ChatProvider::new("https://api.openai.com", "sk-...");
//! // answer_async is the primary entry point; the AnsweringService impl
//! // wraps it for synchronous callers.
//! ```

use crate::LlmError;
use docqa_domain::traits::{Answer, AnsweringService as AnsweringServiceTrait};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Sampling temperature used for every request
pub const TEMPERATURE: f32 = 0.7;

/// Completion token cap used for every request
pub const MAX_TOKENS: u32 = 1000;

/// System instruction sent with every question
const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions \
based on the provided documents. Always cite which document(s) you're referencing.";

/// OpenAI-compatible chat-completions client
pub struct ChatProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

impl ChatProvider {
    /// Create a provider for the given endpoint and API key
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// The configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(question: &str, context: &str, model: &str) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Documents:\n\n{}\n\nQuestion: {}", context, question),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }

    /// Answer a question against the assembled context
    ///
    /// # Errors
    ///
    /// - [`LlmError::ModelNotAvailable`] if the endpoint rejects the model
    /// - [`LlmError::Communication`] on network failures or error statuses
    /// - [`LlmError::InvalidResponse`] on malformed bodies
    pub async fn answer_async(
        &self,
        question: &str,
        context: &str,
        model: &str,
    ) -> Result<Answer, LlmError> {
        let url = format!("{}/v1/chat/completions", self.endpoint);
        let request_body = Self::build_request(question, context, model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(LlmError::ModelNotAvailable(model.to_string()));
            }
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("Empty choices".to_string()))?;

        Ok(Answer::text_only(choice.message.content))
    }
}

impl AnsweringServiceTrait for ChatProvider {
    type Error = LlmError;

    fn answer(&self, question: &str, context: &str, model: &str) -> Result<Answer, Self::Error> {
        // Blocking wrapper for async function
        tokio::runtime::Runtime::new()
            .map_err(|e| LlmError::Communication(e.to_string()))?
            .block_on(async { self.answer_async(question, context, model).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_provider_creation() {
        let provider = ChatProvider::new("https://api.openai.com", "sk-test");
        assert_eq!(provider.endpoint(), "https://api.openai.com");
    }

    #[test]
    fn test_request_shape() {
        let request = ChatProvider::build_request("why?", "some context", "gpt-4.1-mini");

        assert_eq!(request.model, "gpt-4.1-mini");
        assert_eq!(request.temperature, TEMPERATURE);
        assert_eq!(request.max_tokens, MAX_TOKENS);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert!(request.messages[1].content.starts_with("Documents:\n\n"));
        assert!(request.messages[1].content.ends_with("Question: why?"));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "Per report.pdf, yes." } }
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "Per report.pdf, yes.");
    }

    #[tokio::test]
    async fn test_error_on_unreachable_endpoint() {
        let provider = ChatProvider::with_timeout(
            "http://127.0.0.1:1",
            "sk-test",
            Duration::from_millis(200),
        );

        let result = provider.answer_async("q", "ctx", "gpt-4.1-mini").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
