//! System context for the coding assistant
//!
//! The prompt embeds the current file listing, rebuilt on every call so the
//! model sees files created or deleted during the session.

use std::path::PathBuf;

use agent_core::context::ContextSource;

use crate::files::list_files;

const SYSTEM_PROMPT_TEMPLATE: &str = "\
This is a conversation between a helpful AI coding assistant and a developer writing a software
project, please answer questions and use the tools available (when it makes sense) to help.

Here are the files on their machine that may be relevant:

{files}

";

/// Fill the template with one path per line
pub fn render_system_prompt(files: &[PathBuf]) -> String {
    let listing = files
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    SYSTEM_PROMPT_TEMPLATE.replace("{files}", &listing)
}

/// Context source backed by a live listing of a workspace root
#[derive(Clone, Debug)]
pub struct WorkspaceContext {
    root: PathBuf,
}

impl WorkspaceContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContextSource for WorkspaceContext {
    fn system_prompt(&self) -> agent_core::Result<String> {
        let files = list_files(&self.root)?;
        Ok(render_system_prompt(&files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_render() {
        let prompt = render_system_prompt(&[PathBuf::from("a.txt"), PathBuf::from("src/lib.rs")]);
        assert!(prompt.starts_with("This is a conversation"));
        assert!(prompt.ends_with("may be relevant:\n\na.txt\nsrc/lib.rs\n\n"));
    }

    #[test]
    fn test_context_sees_new_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("first.rs"), "").unwrap();
        let context = WorkspaceContext::new(dir.path());

        let before = context.system_prompt().unwrap();
        assert!(before.contains("first.rs"));
        assert!(!before.contains("second.rs"));

        fs::write(dir.path().join("second.rs"), "").unwrap();
        let after = context.system_prompt().unwrap();
        assert!(after.contains("second.rs"));
    }

    #[test]
    fn test_bad_pattern_is_workspace_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".cignore"), "[oops\n").unwrap();

        let err = WorkspaceContext::new(dir.path()).system_prompt().unwrap_err();
        assert!(matches!(err, agent_core::AgentError::Workspace(_)));
    }
}
