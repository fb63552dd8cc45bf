//! Operator Console
//!
//! The human side of the conversation: blocking line input and transcript
//! echo. The terminal implementation lives in the CLI; [`ScriptedConsole`]
//! replays canned input for development and tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AgentError, Result};

#[async_trait]
pub trait Console: Send + Sync {
    /// Show `prompt` and wait for one line of input, without its line ending
    ///
    /// Returns [`AgentError::InputClosed`] once input is exhausted.
    async fn read_line(&self, prompt: &str) -> Result<String>;

    /// Echo rendered output
    fn show(&self, text: &str);
}

/// Console fed from a fixed list of lines
#[derive(Default)]
pub struct ScriptedConsole {
    input: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    shown: Mutex<Vec<String>>,
}

impl ScriptedConsole {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            input: Mutex::new(lines.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Output shown so far
    pub fn shown(&self) -> Vec<String> {
        self.shown.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn read_line(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        self.input
            .lock()
            .map_err(|_| AgentError::Other("console input poisoned".into()))?
            .pop_front()
            .ok_or(AgentError::InputClosed)
    }

    fn show(&self, text: &str) {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(text.to_string());
        }
    }
}
