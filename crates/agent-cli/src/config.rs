//! Application configuration

use agent_core::provider::DEFAULT_MODEL;
use agent_core::{AgentError, Result};

const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Settings for the conversation itself; API credentials live with the provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Model identifier (`MODEL`)
    pub model: String,

    /// Output token budget per response (`MAX_TOKENS`)
    pub max_tokens: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let model = lookup("MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.into());

        let max_tokens = match lookup("MAX_TOKENS") {
            None => DEFAULT_MAX_TOKENS,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AgentError::Config(format!("MAX_TOKENS must be a positive integer, got {raw:?}"))
                })?,
        };

        Ok(Self { model, max_tokens })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.model, "claude-3-opus-20240229");
        assert_eq!(config.max_tokens, 1024);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(|key| match key {
            "MODEL" => Some("claude-3-5-sonnet-20240620".into()),
            "MAX_TOKENS" => Some(" 4096 ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.model, "claude-3-5-sonnet-20240620");
        assert_eq!(config.max_tokens, 4096);
    }

    #[test]
    fn test_invalid_max_tokens() {
        for raw in ["0", "-5", "lots"] {
            let err = AppConfig::from_lookup(|key| (key == "MAX_TOKENS").then(|| raw.to_string()))
                .unwrap_err();
            assert!(matches!(err, AgentError::Config(_)), "{raw}");
        }
    }
}
