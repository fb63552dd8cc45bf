//! Conversation Loop
//!
//! Drives the turn-by-turn exchange with the model:
//!
//! 1. send transcript, fresh system context and tool schemas
//! 2. on `tool_use`, run every requested tool in emission order and send the
//!    results back as a single turn
//! 3. on any other stop reason, wait for the human and send their reply
//!
//! The loop only ends on an error; [`AgentError::InputClosed`] is how a
//! console signals a normal end of session.

use std::sync::Arc;

use crate::console::Console;
use crate::context::ContextSource;
use crate::error::{AgentError, Result};
use crate::message::{ContentBlock, Message, Role, Transcript};
use crate::provider::{Completion, GenerationOptions, LlmProvider};
use crate::render::render_message;
use crate::tool::{ToolCall, ToolRegistry};

/// Prompt shown when waiting for the human
pub const INPUT_PROMPT: &str = "> ";

/// Agent configuration
#[derive(Clone, Debug, Default)]
pub struct AgentConfig {
    /// Generation options; the system prompt is filled in per call
    pub generation: GenerationOptions,
}

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    console: Arc<dyn Console>,
    context: Arc<dyn ContextSource>,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        console: Arc<dyn Console>,
        context: Arc<dyn ContextSource>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            console,
            context,
            config,
        }
    }

    /// Run a session
    ///
    /// The first human turn is `first_message` if given, otherwise it is read
    /// from the console. Every turn is appended to `transcript`, which stays
    /// with the caller when the loop ends.
    pub async fn run(&self, transcript: &mut Transcript, first_message: Option<String>) -> Result<()> {
        let opening = match first_message {
            Some(message) => message,
            None => self.console.read_line(INPUT_PROMPT).await?,
        };
        transcript.push(Message::user(opening));

        let mut completion = self.invoke(transcript).await?;

        loop {
            let reply = completion.to_message();

            if completion.wants_tools() {
                let results = self.dispatch(&reply).await?;
                transcript.push(reply);
                self.console.show(&render_message(&results));
                transcript.push(results);
            } else {
                let input = self.console.read_line(INPUT_PROMPT).await?;
                transcript.push(reply);
                transcript.push(Message::user(input));
            }

            completion = self.invoke(transcript).await?;
        }
    }

    /// Call the model with the current transcript and echo the response
    async fn invoke(&self, transcript: &Transcript) -> Result<Completion> {
        let system_prompt = self.context.system_prompt()?;
        let options = self.config.generation.with_system_prompt(system_prompt);
        let schemas = self.tools.schemas();

        tracing::debug!(
            provider = self.provider.name(),
            model = %options.model,
            turns = transcript.len(),
            "Invoking model"
        );

        let completion = self
            .provider
            .complete(transcript.messages(), &schemas, &options)
            .await?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                stop_reason = ?completion.stop_reason,
                "Model responded"
            );
        }

        self.console.show(&render_message(&completion.to_message()));
        Ok(completion)
    }

    /// Run every tool request in `reply` and collect the results turn
    ///
    /// Each request yields exactly one `tool_result` block, in request order,
    /// followed by the human's follow-up text when the tool produced one.
    async fn dispatch(&self, reply: &Message) -> Result<Message> {
        let mut blocks = Vec::new();

        for block in reply.tool_uses() {
            let ContentBlock::ToolUse { id, name, input } = block else {
                continue;
            };

            let call = ToolCall::new(id, name, input)?;
            tracing::debug!(tool = %call.name, id = %call.id, "Executing tool");

            let result = self.tools.execute(&call).await?;

            blocks.push(ContentBlock::tool_result(id, result.output));
            if let Some(text) = result.follow_up {
                blocks.push(ContentBlock::text(text));
            }
        }

        Ok(Message::blocks(Role::User, blocks))
    }
}

/// Builder for Agent configuration
#[derive(Default)]
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: Option<Arc<ToolRegistry>>,
    console: Option<Arc<dyn Console>>,
    context: Option<Arc<dyn ContextSource>>,
    config: AgentConfig,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    #[must_use]
    pub fn tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = Some(tools);
        self
    }

    #[must_use]
    pub fn console(mut self, console: Arc<dyn Console>) -> Self {
        self.console = Some(console);
        self
    }

    #[must_use]
    pub fn context(mut self, context: Arc<dyn ContextSource>) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.generation.max_tokens = max_tokens;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;
        let console = self
            .console
            .ok_or_else(|| AgentError::Config("Console is required".into()))?;
        let context = self
            .context
            .ok_or_else(|| AgentError::Config("Context source is required".into()))?;
        let tools = self.tools.unwrap_or_default();

        Ok(Agent::new(provider, tools, console, context, self.config))
    }
}
