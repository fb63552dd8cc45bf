//! # agent-core
//!
//! Conversation loop for a terminal coding assistant, with a provider-agnostic
//! LLM abstraction and a small tool system.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Agent                              │
//! │  ┌──────────────┐  ┌──────────────┐  ┌────────────────────┐  │
//! │  │ Conversation │  │    Tools     │  │    LlmProvider     │  │
//! │  │     Loop     │──│   Registry   │──│    (Strategy)      │  │
//! │  └──────────────┘  └──────────────┘  └────────────────────┘  │
//! │         │                                                    │
//! │  ┌──────────────┐  ┌──────────────┐                          │
//! │  │   Console    │  │ContextSource │                          │
//! │  └──────────────┘  └──────────────┘                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod console;
pub mod context;
pub mod error;
pub mod message;
pub mod provider;
pub mod reasoning;
pub mod render;
pub mod tool;

pub use console::{Console, ScriptedConsole};
pub use context::{ContextSource, StaticContext};
pub use error::{AgentError, Result};
pub use message::{ContentBlock, Message, MessageContent, Role, Transcript};
pub use provider::{Completion, GenerationOptions, LlmProvider, StopReason, TokenUsage};
pub use reasoning::{Agent, AgentBuilder, AgentConfig};
pub use render::render_message;
pub use tool::{ParameterSchema, Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
