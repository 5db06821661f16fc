//! LLM — chat-completion transport and code extraction.
//!
//! DESIGN
//! ======
//! Uses environment variables for connection settings. [`LlmClient`] is the
//! production [`LlmChat`] implementation; tests substitute a mock behind the
//! same trait.

pub mod config;
pub mod extract;
pub mod openai;
pub mod types;

use tracing::{info, warn};

use config::ApiConfig;
pub use types::LlmChat;
use types::{ChatRequest, Choice, ContentPart, LlmError, MessageContent};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete LLM client speaking the OpenAI chat-completions protocol.
///
/// Built from an [`ApiConfig`] by [`LlmClient::from_config`]; the same config
/// is passed again on every call so one client can serve several endpoints.
pub struct LlmClient {
    inner: openai::OpenAiClient,
}

impl LlmClient {
    /// Build an LLM client using the timeouts of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &ApiConfig) -> Result<Self, LlmError> {
        Ok(Self { inner: openai::OpenAiClient::new(config.timeouts)? })
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, request: &ChatRequest, config: &ApiConfig) -> Result<Vec<Choice>, LlmError> {
        info!(
            model = %request.model,
            messages = request.messages.len(),
            images = count_image_parts(request),
            tools = request.tools.len(),
            "llm: chat request"
        );
        let result = self.inner.chat(request, config).await;
        if let Err(e) = &result {
            warn!(error = %e, "llm: chat request failed");
        }
        result
    }
}

/// Number of `image_url` parts across all messages of `request`.
#[must_use]
pub fn count_image_parts(request: &ChatRequest) -> usize {
    request
        .messages
        .iter()
        .map(|m| match &m.content {
            MessageContent::Text(_) => 0,
            MessageContent::Parts(parts) => parts
                .iter()
                .filter(|p| matches!(p, ContentPart::ImageUrl { .. }))
                .count(),
        })
        .sum()
}
