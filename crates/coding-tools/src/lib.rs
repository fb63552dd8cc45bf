//! # coding-tools
//!
//! The workspace-facing half of the coding assistant:
//!
//! - [`files`]: recursive file listing filtered by `.cignore` regexes
//! - [`prompt`]: system prompt built from that listing on every model call
//! - [`tools`]: `read_file` and `write_file`, the latter gated by an operator
//!   confirmation

pub mod error;
pub mod files;
pub mod prompt;
pub mod tools;

pub use error::{Result, WorkspaceError};
pub use files::{list_files, IgnorePatterns, IGNORE_FILE};
pub use prompt::{render_system_prompt, WorkspaceContext};
pub use tools::{registry, ReadFileTool, WriteFileTool};
