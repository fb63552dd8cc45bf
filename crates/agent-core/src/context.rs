//! System context
//!
//! The system prompt is asked for on every model invocation, so a source
//! backed by the filesystem always reflects the current working tree.

use crate::error::Result;

pub trait ContextSource: Send + Sync {
    /// Build the system prompt for the next model call
    fn system_prompt(&self) -> Result<String>;
}

/// A fixed system prompt
#[derive(Clone, Debug)]
pub struct StaticContext(pub String);

impl ContextSource for StaticContext {
    fn system_prompt(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}
