//! Write File Tool
//!
//! Every write is confirmed by the operator first. An empty reply accepts;
//! anything else denies the write and is handed to the model as the human's
//! answer.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use agent_core::{Console, ParameterSchema, Result, Tool, ToolCall, ToolResult, ToolSchema};

use super::resolve;

/// Tool output when the operator refuses a write
pub const DENIED_MESSAGE: &str = "User denied writing to file";

#[derive(Debug, Deserialize)]
struct WriteFileParams {
    file: String,
    content: String,
}

pub struct WriteFileTool {
    root: PathBuf,
    console: Arc<dyn Console>,
}

impl WriteFileTool {
    pub fn new(root: impl Into<PathBuf>, console: Arc<dyn Console>) -> Self {
        Self {
            root: root.into(),
            console,
        }
    }

    async fn write(&self, params: &WriteFileParams) -> std::io::Result<u64> {
        let path = resolve(&self.root, &params.file);
        tokio::fs::write(&path, &params.content).await?;
        Ok(tokio::fs::metadata(&path).await?.len())
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "write_file".into(),
            description: "Write some text to a file".into(),
            parameters: vec![
                ParameterSchema::string("file", "Path of the file to write"),
                ParameterSchema::string("content", "Full text to write to the file"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let params: WriteFileParams = call.parse_arguments()?;

        let prompt = format!(
            "Write to file: {}\nContent: \n{}\n\nEnter to accept, otherwise write a response: ",
            params.file, params.content
        );
        let acceptance = self.console.read_line(&prompt).await?;

        if !acceptance.is_empty() {
            tracing::info!(file = %params.file, "Write denied by operator");
            return Ok(ToolResult::output(DENIED_MESSAGE).with_follow_up(acceptance));
        }

        let output = match self.write(&params).await {
            Ok(size) => format!("Bytes written {size}"),
            Err(e) => {
                tracing::warn!(file = %params.file, error = %e, "write_file failed");
                e.to_string()
            }
        };

        Ok(ToolResult::output(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::ScriptedConsole;
    use serde_json::json;
    use std::fs;

    fn call(file: &str, content: &str) -> ToolCall {
        ToolCall::new("toolu_w", "write_file", &json!({ "file": file, "content": content })).unwrap()
    }

    #[tokio::test]
    async fn test_accept_writes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let console = Arc::new(ScriptedConsole::new([""]));
        let tool = WriteFileTool::new(dir.path(), console.clone());

        let content = "fn main() {\n    println!(\"héllo\");\n}\n";
        let result = tool.execute(&call("main.rs", content)).await.unwrap();

        let written = fs::read_to_string(dir.path().join("main.rs")).unwrap();
        assert_eq!(written, content);
        assert_eq!(result.output, format!("Bytes written {}", content.len()));
        assert!(result.follow_up.is_none());

        let prompt = &console.prompts()[0];
        assert!(prompt.starts_with("Write to file: main.rs\nContent: \nfn main() {"));
        assert!(prompt.ends_with("Enter to accept, otherwise write a response: "));
    }

    #[tokio::test]
    async fn test_accept_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a much longer original body").unwrap();
        let tool = WriteFileTool::new(dir.path(), Arc::new(ScriptedConsole::new([""])));

        let result = tool.execute(&call("a.txt", "short")).await.unwrap();
        assert_eq!(result.output, "Bytes written 5");
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "short");
    }

    #[tokio::test]
    async fn test_deny_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let console = Arc::new(ScriptedConsole::new(["use a constant instead"]));
        let tool = WriteFileTool::new(dir.path(), console);

        let result = tool.execute(&call("config.rs", "let x = 5;")).await.unwrap();

        assert!(!dir.path().join("config.rs").exists());
        assert_eq!(
            result,
            ToolResult::output(DENIED_MESSAGE).with_follow_up("use a constant instead")
        );
    }

    #[tokio::test]
    async fn test_whitespace_reply_denies() {
        let dir = tempfile::tempdir().unwrap();
        let tool = WriteFileTool::new(dir.path(), Arc::new(ScriptedConsole::new([" "])));

        let result = tool.execute(&call("x.txt", "x")).await.unwrap();
        assert_eq!(result.output, DENIED_MESSAGE);
        assert!(!dir.path().join("x.txt").exists());
    }

    #[tokio::test]
    async fn test_write_failure_is_soft_error() {
        let dir = tempfile::tempdir().unwrap();
        let tool = WriteFileTool::new(dir.path(), Arc::new(ScriptedConsole::new([""])));

        let result = tool.execute(&call("missing/dir/file.txt", "x")).await.unwrap();
        assert!(!result.output.starts_with("Bytes written"));
        assert!(result.follow_up.is_none());
    }

    #[tokio::test]
    async fn test_closed_input_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let tool = WriteFileTool::new(dir.path(), Arc::new(ScriptedConsole::new(Vec::<String>::new())));

        let err = tool.execute(&call("x.txt", "x")).await.unwrap_err();
        assert!(err.is_end_of_input());
    }
}
