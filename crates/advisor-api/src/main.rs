//! Advisor command-line client entry point.
//!
//! Binary name: `advisor`
//!
//! Parses CLI arguments, sets up tracing, resolves configuration, then
//! dispatches to the interactive chat loop or a one-shot session command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use advisor_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::{Cli, Commands, SessionAction};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,advisor=debug",
        _ => "trace",
    };
    init_tracing(filter, cli.otel).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need configuration
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "advisor", &mut std::io::stdout());
        return Ok(());
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init(cli.url.clone()).await?;

    match cli.command {
        Commands::Chat { session } => {
            cli::chat::loop_runner::run_chat_loop(&state, session, cli.quiet).await?;
        }

        Commands::Session { action } => match action {
            SessionAction::Show { token } => {
                cli::session::show_session(&state, &token, cli.json).await?;
            }
            SessionAction::New => {
                cli::session::new_session(&state, cli.json).await?;
            }
        },

        Commands::Config => {
            cli::config::show_config(&state, cli.json).await?;
        }

        // Handled before state initialization.
        Commands::Completions { .. } => {}
    }

    Ok(())
}
