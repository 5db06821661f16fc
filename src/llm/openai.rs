//! OpenAI-compatible chat-completions client.
//!
//! Posts to `{base_url}/chat/completions` and returns the raw `choices`
//! list. Works against any server that speaks the same wire format.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use super::config::{ApiConfig, LlmTimeouts};
use super::types::{ChatRequest, Choice, LlmChat, LlmError, Message, Tool, ToolChoice};

pub struct OpenAiClient {
    http: reqwest::Client,
}

impl OpenAiClient {
    /// Build a client whose HTTP timeouts come from `timeouts`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    async fn send_json(&self, config: &ApiConfig, path: &str, body: &impl Serialize) -> Result<String, LlmError> {
        let url = format!("{}{}", config.base_url, path);
        let response = self
            .http
            .post(url)
            .bearer_auth(&config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl LlmChat for OpenAiClient {
    async fn chat(&self, request: &ChatRequest, config: &ApiConfig) -> Result<Vec<Choice>, LlmError> {
        let body = CcRequest::from(request);
        let text = self.send_json(config, "/chat/completions", &body).await?;
        parse_chat_completions_response(&text)
    }
}

// =============================================================================
// CHAT COMPLETIONS — wire types
// =============================================================================

#[derive(Serialize)]
struct CcRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<CcToolDef<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
}

impl<'a> From<&'a ChatRequest> for CcRequest<'a> {
    fn from(request: &'a ChatRequest) -> Self {
        // Strict servers reject `tool_choice` without `tools`; an empty tool
        // list already means the model cannot call anything.
        let (tools, tool_choice) = if request.tools.is_empty() {
            (None, None)
        } else {
            (Some(request.tools.iter().map(CcToolDef::from).collect()), Some(request.tool_choice))
        };
        Self { model: &request.model, messages: &request.messages, tools, tool_choice }
    }
}

#[derive(Serialize)]
struct CcToolDef<'a> {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: CcFunctionDef<'a>,
}

#[derive(Serialize)]
struct CcFunctionDef<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

impl<'a> From<&'a Tool> for CcToolDef<'a> {
    fn from(tool: &'a Tool) -> Self {
        Self {
            tool_type: "function",
            function: CcFunctionDef {
                name: &tool.name,
                description: &tool.description,
                parameters: &tool.input_schema,
            },
        }
    }
}

#[derive(Deserialize)]
struct CcResponse {
    #[serde(default)]
    model: String,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<CcUsage>,
}

#[derive(Deserialize)]
struct CcUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

pub(crate) fn parse_chat_completions_response(json_text: &str) -> Result<Vec<Choice>, LlmError> {
    let response: CcResponse = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    let (input_tokens, output_tokens) = response
        .usage
        .map_or((0, 0), |u| (u.prompt_tokens, u.completion_tokens));
    info!(
        model = %response.model,
        choices = response.choices.len(),
        input_tokens,
        output_tokens,
        "llm: chat completion received"
    );
    Ok(response.choices)
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
