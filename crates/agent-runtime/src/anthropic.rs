//! Anthropic LLM Provider
//!
//! Implementation of `LlmProvider` for the hosted Messages API with native
//! tool use. One blocking request per call; no retries, no timeout.

use agent_core::{
    error::{AgentError, Result},
    message::{ContentBlock, Message, Role},
    provider::{Completion, GenerationOptions, LlmProvider, StopReason, TokenUsage},
    tool::ToolSchema,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const API_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic provider configuration
#[derive(Clone, Debug)]
pub struct AnthropicConfig {
    /// API key sent as `x-api-key`
    pub api_key: String,

    /// API origin, without the `/v1/messages` path
    pub base_url: String,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    /// Read `ANTHROPIC_API_KEY` and `ANTHROPIC_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("ANTHROPIC_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AgentError::Config("ANTHROPIC_API_KEY is not set".into()))?;
        let base_url = lookup("ANTHROPIC_BASE_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    client: reqwest::Client,
    config: AnthropicConfig,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolDefinition<'a>>,
}

#[derive(Serialize)]
struct ToolDefinition<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: Value,
}

#[derive(Deserialize)]
struct MessagesResponse {
    role: Role,
    content: Vec<ContentBlock>,
    model: String,
    stop_reason: Option<StopReason>,
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

impl AnthropicProvider {
    /// Create from configuration
    pub fn from_config(config: AnthropicConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(AnthropicConfig::from_env()?))
    }

    fn build_request<'a>(
        messages: &'a [Message],
        tools: &'a [ToolSchema],
        options: &'a GenerationOptions,
    ) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &options.model,
            max_tokens: options.max_tokens,
            system: options.system_prompt.as_deref(),
            messages,
            tools: tools
                .iter()
                .map(|t| ToolDefinition {
                    name: &t.name,
                    description: &t.description,
                    input_schema: t.input_schema(),
                })
                .collect(),
        }
    }

    /// Map a non-success response onto the error taxonomy
    fn classify_error(status: StatusCode, body: &str) -> AgentError {
        let detail = serde_json::from_str::<ErrorEnvelope>(body).map_or_else(
            |_| format!("{status}: {body}"),
            |e| format!("{status} {}: {}", e.error.kind, e.error.message),
        );

        match status.as_u16() {
            401 | 403 => AgentError::Auth(detail),
            429 => AgentError::RateLimited(detail),
            500..=599 => AgentError::ProviderUnavailable(detail),
            _ => AgentError::Provider(detail),
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolSchema],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = Self::build_request(messages, tools, options);

        let response = self
            .client
            .post(self.config.messages_url())
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::Provider(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(%status, body = %body, "Anthropic request failed");
            return Err(Self::classify_error(status, &body));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body)?;

        Ok(Completion {
            role: parsed.role,
            content: parsed.content,
            model: parsed.model,
            stop_reason: parsed.stop_reason.unwrap_or(StopReason::Other),
            usage: parsed.usage,
        })
    }
}
