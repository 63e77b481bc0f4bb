//! CLI command definitions for the `advisor` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod config;
pub mod session;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with the interview advisor.
#[derive(Parser)]
#[command(name = "advisor", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Advisor service base URL (overrides config.toml).
    #[arg(long, global = true, env = "ADVISOR_BASE_URL")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive conversation with the advisor.
    Chat {
        /// Resume a previous session by ID instead of being asked for one.
        #[arg(long, short)]
        session: Option<String>,
    },

    /// One-shot session operations.
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show the resolved data directory and effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Load a session and print its conversation.
    Show {
        /// Session ID to load.
        token: String,
    },

    /// Start a new session and print the advisor's greeting.
    New,
}
