//! cignore-agent
//!
//! Terminal coding assistant: chat with a hosted model that can read and
//! (with confirmation) write files in the current directory. The file
//! listing it sees honours `.cignore`.

mod config;
mod terminal;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{AgentBuilder, Console, Transcript};
use agent_runtime::AnthropicProvider;
use coding_tools::WorkspaceContext;

use crate::config::AppConfig;
use crate::terminal::TerminalConsole;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Opening message; read from the terminal when omitted
    message: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout belongs to the conversation
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let root = std::env::current_dir()?;

    let provider = Arc::new(AnthropicProvider::from_env()?);
    let console: Arc<dyn Console> = Arc::new(TerminalConsole::stdin());
    let tools = Arc::new(coding_tools::registry(&root, Arc::clone(&console)));

    tracing::info!(
        model = %config.model,
        root = %root.display(),
        tools = ?tools.names(),
        "Starting session"
    );

    let agent = AgentBuilder::new()
        .provider(provider)
        .tools(tools)
        .console(console)
        .context(Arc::new(WorkspaceContext::new(&root)))
        .model(config.model)
        .max_tokens(config.max_tokens)
        .build()?;

    let mut transcript = Transcript::new();
    match agent.run(&mut transcript, cli.message).await {
        Err(e) if e.is_end_of_input() => {
            tracing::info!(turns = transcript.len(), "Input closed, ending session");
            Ok(())
        }
        Err(e) => Err(e.into()),
        Ok(()) => Ok(()),
    }
}
