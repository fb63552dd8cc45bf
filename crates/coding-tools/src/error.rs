//! Error Types for workspace scanning

use agent_core::AgentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorkspaceError>;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Invalid ignore pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read ignore file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<WorkspaceError> for AgentError {
    fn from(err: WorkspaceError) -> Self {
        Self::Workspace(err.to_string())
    }
}
