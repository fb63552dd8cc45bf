//! Read File Tool

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use agent_core::{ParameterSchema, Result, Tool, ToolCall, ToolResult, ToolSchema};

use super::resolve;

#[derive(Debug, Deserialize)]
struct ReadFileParams {
    file: String,
}

/// Returns a file's full text, or the error description if it cannot be read
pub struct ReadFileTool {
    root: PathBuf,
}

impl ReadFileTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "read_file".into(),
            description: "Read the contents of a file".into(),
            parameters: vec![ParameterSchema::string("file", "Path of the file to read")],
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let params: ReadFileParams = call.parse_arguments()?;
        let path = resolve(&self.root, &params.file);

        let output = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "read_file failed");
                e.to_string()
            }
        };

        Ok(ToolResult::output(output))
    }
}
