//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
///
/// Everything in here is fatal to the conversation. Soft failures (a file
/// that cannot be read, a write that fails) never become an `AgentError`;
/// tools report them back to the model as ordinary output.
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider returned an error response
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Rate limited by the provider
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The model asked for a tool that is not registered
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// The model sent structurally invalid tool arguments
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// Building the workspace context failed (traversal, ignore patterns)
    #[error("Workspace error: {0}")]
    Workspace(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The operator closed the input stream
    #[error("Input closed")]
    InputClosed,

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal failure with no better category (a poisoned lock)
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Whether the error ends the session without being a failure
    pub const fn is_end_of_input(&self) -> bool {
        matches!(self, Self::InputClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_of_input() {
        assert!(AgentError::InputClosed.is_end_of_input());
        assert!(!AgentError::Provider("boom".into()).is_end_of_input());
    }

    #[test]
    fn test_display() {
        let err = AgentError::ToolNotFound("delete_everything".into());
        assert_eq!(err.to_string(), "Tool not found: delete_everything");
    }
}
