//! Fake AI client for tests and offline development.
//!
//! Responses are matched by checking whether the prompt contains a registered
//! substring, so tests run without network access or API costs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use super::{AiClient, AiError, ChatRequest, ChatResponse, Usage};

/// Reply used by [`FakeAiClient::default`], shaped like a transformed recipe.
pub const CANNED_TRANSFORMATION: &str = r#"{"title": "Fake Transformed Recipe", "ingredients": ["1 cup imagination"], "instructions": "Configure a real AI provider to transform recipes."}"#;

/// A fake AI client.
///
/// Patterns are checked in registration order (case-insensitive) and the first
/// match wins. Without a match the default response is returned, or an error
/// when none is set. Every call is recorded.
#[derive(Debug)]
pub struct FakeAiClient {
    responses: Vec<(String, String)>,
    default_response: Option<String>,
    failure: Option<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl Default for FakeAiClient {
    fn default() -> Self {
        Self::new().with_default_response(CANNED_TRANSFORMATION)
    }
}

impl FakeAiClient {
    /// Create a FakeAiClient with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            default_response: None,
            failure: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a client that returns `response` for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        Self::new().add_response(prompt_contains, response)
    }

    /// Create a client that answers every prompt with `response`.
    pub fn always(response: &str) -> Self {
        Self::new().with_default_response(response)
    }

    /// Create a client whose every call fails with an API error.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), response.to_string()));
        self
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Number of `complete` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = request.prompt_text();
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.clone());

        tracing::debug!(prompt_name = prompt_name, "FakeAiClient answering");

        if let Some(message) = &self.failure {
            return Err(AiError::Api(message.clone()));
        }

        let prompt_lower = prompt.to_lowercase();
        let content = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt_lower.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .or_else(|| self.default_response.clone())
            .ok_or_else(|| {
                AiError::Api(format!(
                    "FakeAiClient: No response configured for prompt (first 100 chars): {}",
                    prompt.chars().take(100).collect::<String>()
                ))
            })?;

        Ok(ChatResponse {
            content,
            usage: Usage::default(),
        })
    }
}
