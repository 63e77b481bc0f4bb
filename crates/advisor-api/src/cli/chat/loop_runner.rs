//! Main chat loop orchestration.
//!
//! Asks for a session ID (or takes `--session`), begins or resumes the
//! session through the controller, then reads lines until the user exits.
//! Every line that is not a slash command is sent to the advisor.

use std::time::Duration;

use console::style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use advisor_core::advisor::service::AdvisorService;
use advisor_core::conversation::controller::{GreetingStatus, SessionController};
use advisor_core::conversation::error::ConversationError;

use crate::state::AppState;

use super::banner::{print_farewell, print_session_banner, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Spinner shown while a request is in flight.
fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn ask_session_token() -> anyhow::Result<String> {
    let token = Input::<String>::new()
        .with_prompt("  Previous session ID (leave blank to start a new session)")
        .allow_empty(true)
        .interact_text()?;
    Ok(token)
}

/// Begin or resume a session, re-asking for the ID after a failure unless
/// it came from the command line.
async fn establish_session<S: AdvisorService>(
    controller: &SessionController<S>,
    renderer: &ChatRenderer,
    mut preset: Option<String>,
) -> anyhow::Result<()> {
    let from_flag = preset.is_some();

    loop {
        let token = match preset.take() {
            Some(token) => token,
            None => ask_session_token()?,
        };
        controller.set_session_token_draft(&token);

        let progress = spinner(if token.trim().is_empty() {
            "Starting session..."
        } else {
            "Loading session..."
        });
        let result = controller.begin_from_draft().await;
        progress.finish_and_clear();

        match result {
            Ok(outcome) => {
                let snapshot = controller.snapshot();
                print_session_banner(&outcome.confirmation(), &snapshot.session_label());
                if let GreetingStatus::Failed(err) = &outcome.greeting {
                    debug!(error = %err, "Greeting failed");
                }
                if let Some(notice) = &snapshot.notice {
                    renderer.print_notice(notice);
                }
                renderer.print_log(&snapshot.log);
                return Ok(());
            }
            Err(err) => {
                match controller.notice() {
                    Some(notice) => renderer.print_notice(&notice),
                    None => eprintln!("  {} {err}", style("!").red().bold()),
                }
                if from_flag {
                    return Err(err.into());
                }
            }
        }
    }
}

/// Send one line and print the advisor's reply.
async fn send_line<S: AdvisorService>(
    controller: &SessionController<S>,
    renderer: &ChatRenderer,
    text: &str,
) {
    controller.set_message_draft(text);

    let progress = spinner("Sending...");
    let result = controller.submit_draft().await;
    progress.finish_and_clear();

    match result {
        Ok(log) => {
            println!();
            renderer.print_replies(&log);
        }
        Err(ConversationError::Busy) => {
            debug!("Send ignored, a request is still in flight");
        }
        Err(err) => match controller.notice() {
            Some(notice) => renderer.print_notice(&notice),
            None => eprintln!("  {} {err}", style("!").red().bold()),
        },
    }
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(
    state: &AppState,
    session: Option<String>,
    quiet: bool,
) -> anyhow::Result<()> {
    let controller = state.controller()?;
    let renderer = ChatRenderer::new();

    if !quiet {
        print_welcome_banner(&state.config.base_url);
    }

    establish_session(&controller, &renderer, session).await?;
    info!(session_id = ?controller.session_id(), "Chat loop started");

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!(
                    "  {}",
                    style("Press Ctrl+D or type /exit to leave, or keep chatting.").dim()
                );
            }
            InputEvent::Line(text) if text.is_empty() => {}
            InputEvent::Line(text) => match commands::parse(&text) {
                Some(ChatCommand::Help) => commands::print_help(),
                Some(ChatCommand::History) => {
                    let log = controller.log();
                    println!();
                    if log.is_empty() {
                        println!("  {}", style("No messages yet.").dim());
                    } else {
                        println!("{}", log.transcript());
                    }
                    println!();
                }
                Some(ChatCommand::Session) => {
                    println!();
                    println!("  {}", controller.snapshot().session_label());
                    println!();
                }
                Some(ChatCommand::Clear) => chat_input.clear(),
                Some(ChatCommand::Exit) => break,
                Some(ChatCommand::Unknown(name)) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
                None => send_line(&controller, &renderer, &text).await,
            },
        }
    }

    let session_id = controller.session_id();
    print_farewell(session_id.as_ref().map(|id| id.as_str()));
    Ok(())
}
