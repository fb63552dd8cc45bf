//! Transcript rendering
//!
//! One line per content block:
//!
//! ```text
//! assistant: I'll read it first.
//! tool request read_file: {"file":"src/main.rs"}
//! tool result: fn main() {}
//! ```

use crate::message::{ContentBlock, Message, MessageContent, Role};

/// Render a message for the console, terminated by a newline
pub fn render_message(message: &Message) -> String {
    match &message.content {
        MessageContent::Text(text) => format!("{}: {text}\n", message.role),
        MessageContent::Blocks(blocks) => {
            let lines: Vec<String> = blocks
                .iter()
                .map(|block| render_block(message.role, block))
                .collect();
            lines.join("\n") + "\n"
        }
    }
}

fn render_block(role: Role, block: &ContentBlock) -> String {
    match block {
        ContentBlock::Text { text } => format!("{role}: {text}"),
        ContentBlock::ToolResult { content, .. } => format!("tool result: {content}"),
        ContentBlock::ToolUse { name, input, .. } => format!("tool request {name}: {input}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text() {
        assert_eq!(render_message(&Message::user("hello")), "user: hello\n");
    }

    #[test]
    fn test_blocks() {
        let response = Message::blocks(
            Role::Assistant,
            vec![
                ContentBlock::text("Reading."),
                ContentBlock::tool_use("toolu_1", "read_file", json!({"file": "a.txt"})),
            ],
        );
        assert_eq!(
            render_message(&response),
            "assistant: Reading.\ntool request read_file: {\"file\":\"a.txt\"}\n"
        );

        let results = Message::blocks(
            Role::User,
            vec![
                ContentBlock::tool_result("toolu_1", "User denied writing to file"),
                ContentBlock::text("use tabs"),
            ],
        );
        assert_eq!(
            render_message(&results),
            "tool result: User denied writing to file\nuser: use tabs\n"
        );
    }

    #[test]
    fn test_empty_blocks() {
        assert_eq!(render_message(&Message::blocks(Role::Assistant, Vec::new())), "\n");
    }
}
