//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for LLM backends so the conversation loop can
//! run against the hosted API or a scripted double without code changes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_core::provider::{GenerationOptions, LlmProvider};
//!
//! let provider = AnthropicProvider::from_env()?;
//! let completion = provider.complete(transcript.messages(), &tools, &options).await?;
//! ```

use std::collections::VecDeque;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{AgentError, Result};
use crate::message::{ContentBlock, Message, Role};
use crate::tool::ToolSchema;

/// Per-request generation settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "claude-3-opus-20240229")
    pub model: String,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// System context sent alongside the transcript
    #[serde(default)]
    pub system_prompt: Option<String>,
}

pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";

const fn default_max_tokens() -> u32 {
    1024
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            max_tokens: default_max_tokens(),
            system_prompt: None,
        }
    }
}

impl GenerationOptions {
    /// Copy of these options carrying a fresh system prompt
    #[must_use]
    pub fn with_system_prompt(&self, system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: Some(system_prompt.into()),
            ..self.clone()
        }
    }
}

/// Why the model stopped generating
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    StopSequence,
    #[serde(other)]
    Other,
}

/// Token usage statistics
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// Role of the responder (always assistant in practice)
    pub role: Role,

    /// Ordered content blocks
    pub content: Vec<ContentBlock>,

    /// Model that generated this response
    pub model: String,

    /// Why generation stopped
    pub stop_reason: StopReason,

    /// Token usage statistics (if available)
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// The response as a transcript turn, content unmodified
    pub fn to_message(&self) -> Message {
        Message::blocks(self.role, self.content.clone())
    }

    pub fn wants_tools(&self) -> bool {
        self.stop_reason == StopReason::ToolUse
    }
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new LLM backends.
/// The agent works exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Generate a completion for the transcript with the advertised tools
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolSchema],
        options: &GenerationOptions,
    ) -> Result<Completion>;
}

/// A request as seen by [`ScriptedProvider`]
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub tool_names: Vec<String>,
    pub options: GenerationOptions,
}

/// Provider that replays canned completions (for development/testing)
#[derive(Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Completion>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: impl IntoIterator<Item = Completion>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolSchema],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        self.requests.lock().await.push(RecordedRequest {
            messages: messages.to_vec(),
            tool_names: tools.iter().map(|t| t.name.clone()).collect(),
            options: options.clone(),
        });

        self.responses
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| AgentError::ProviderUnavailable("script exhausted".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.max_tokens, 1024);
        assert_eq!(opts.model, "claude-3-opus-20240229");
        assert!(opts.system_prompt.is_none());
    }

    #[test]
    fn test_unknown_stop_reason() {
        let reason: StopReason = serde_json::from_value(json!("pause_turn")).unwrap();
        assert_eq!(reason, StopReason::Other);

        let reason: StopReason = serde_json::from_value(json!("tool_use")).unwrap();
        assert_eq!(reason, StopReason::ToolUse);
    }

    #[tokio::test]
    async fn test_scripted_provider_exhausts() {
        let provider = ScriptedProvider::new(Vec::new());
        let err = provider
            .complete(&[], &[], &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::ProviderUnavailable(_)));
        assert_eq!(provider.requests().await.len(), 1);
    }
}
