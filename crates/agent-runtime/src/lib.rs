//! # agent-runtime
//!
//! Runtime providers for the coding assistant.
//!
//! ## Providers
//!
//! - **Anthropic**: hosted Messages API with native tool use
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::anthropic::AnthropicProvider;
//!
//! let provider = AnthropicProvider::from_env()?;
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

pub mod anthropic;

pub use anthropic::{AnthropicConfig, AnthropicProvider};
