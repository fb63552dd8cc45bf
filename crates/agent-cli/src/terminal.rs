//! Terminal console
//!
//! Prompts and transcript go to stdout; logs go to stderr.

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

use agent_core::{AgentError, Console, Result};

pub struct TerminalConsole<R = BufReader<Stdin>> {
    input: Mutex<R>,
}

impl TerminalConsole {
    /// Console reading from the process's standard input
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> TerminalConsole<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            input: Mutex::new(reader),
        }
    }
}

/// Drop the trailing `\n` or `\r\n`, keeping any other whitespace
fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map_or(line, |l| l.strip_suffix('\r').unwrap_or(l))
}

#[async_trait]
impl<R> Console for TerminalConsole<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn read_line(&self, prompt: &str) -> Result<String> {
        {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
        }

        let mut line = String::new();
        let read = self.input.lock().await.read_line(&mut line).await?;
        if read == 0 {
            return Err(AgentError::InputClosed);
        }

        Ok(strip_line_ending(&line).to_string())
    }

    fn show(&self, text: &str) {
        println!("{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("hello\n"), "hello");
        assert_eq!(strip_line_ending("hello\r\n"), "hello");
        assert_eq!(strip_line_ending("  spaced  \n"), "  spaced  ");
        assert_eq!(strip_line_ending("\n"), "");
        assert_eq!(strip_line_ending("no newline"), "no newline");
    }

    #[tokio::test]
    async fn test_reads_lines_until_eof() {
        let console = TerminalConsole::from_reader(&b"first\n\nlast"[..]);

        assert_eq!(console.read_line("> ").await.unwrap(), "first");
        assert_eq!(console.read_line("> ").await.unwrap(), "");
        assert_eq!(console.read_line("> ").await.unwrap(), "last");
        assert!(console.read_line("> ").await.unwrap_err().is_end_of_input());
    }
}
