//! File tools exposed to the model

mod read_file;
mod write_file;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use agent_core::{Console, ToolRegistry};

pub use read_file::ReadFileTool;
pub use write_file::{WriteFileTool, DENIED_MESSAGE};

/// Resolve a model-supplied path against the workspace root
///
/// Absolute paths are used as given.
fn resolve(root: &Path, file: &str) -> PathBuf {
    root.join(file)
}

/// Registry with `write_file` and `read_file`, in that order
pub fn registry(root: impl Into<PathBuf>, console: Arc<dyn Console>) -> ToolRegistry {
    let root = root.into();
    let mut tools = ToolRegistry::new();
    tools.register(WriteFileTool::new(root.clone(), console));
    tools.register(ReadFileTool::new(root));
    tools
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::ScriptedConsole;

    #[test]
    fn test_registry_order() {
        let console = Arc::new(ScriptedConsole::new(Vec::<String>::new()));
        let tools = registry(".", console);
        assert_eq!(tools.names(), vec!["write_file".to_string(), "read_file".to_string()]);
    }

    #[test]
    fn test_resolve() {
        let root = Path::new("/work");
        assert_eq!(resolve(root, "src/lib.rs"), PathBuf::from("/work/src/lib.rs"));
        assert_eq!(resolve(root, "/etc/hosts"), PathBuf::from("/etc/hosts"));
    }
}
