//! One-shot session commands: show an existing session, start a new one.
//!
//! Both run a single begin/resume through the controller and print the
//! resulting conversation, which makes them usable from scripts with `--json`.

use anyhow::{Result, bail};
use console::style;

use advisor_core::advisor::service::AdvisorService;
use advisor_core::conversation::controller::{BeginOutcome, GreetingStatus, SessionController};

use crate::cli::chat::renderer::ChatRenderer;
use crate::state::AppState;

/// Load a session by ID and print its conversation.
///
/// # Examples
///
/// ```bash
/// advisor session show 7f3c9a
/// advisor session show 7f3c9a --json
/// ```
pub async fn show_session(state: &AppState, token: &str, json: bool) -> Result<()> {
    if token.trim().is_empty() {
        bail!("session ID must not be empty (use `advisor session new` to start one)");
    }

    let controller = state.controller()?;
    let outcome = controller.begin_or_resume(token).await?;
    print_outcome(&controller, &outcome, json)
}

/// Start a new session and print the advisor's opening message.
pub async fn new_session(state: &AppState, json: bool) -> Result<()> {
    let controller = state.controller()?;
    let outcome = controller.begin_or_resume("").await?;
    print_outcome(&controller, &outcome, json)
}

fn print_outcome<S: AdvisorService>(
    controller: &SessionController<S>,
    outcome: &BeginOutcome,
    json: bool,
) -> Result<()> {
    let snapshot = controller.snapshot();

    if json {
        let output = serde_json::json!({
            "session_id": outcome.session_id,
            "resumed": outcome.resumed,
            "greeting_delivered": matches!(outcome.greeting, GreetingStatus::Delivered),
            "notice": snapshot.notice,
            "messages": snapshot.log,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("*").green().bold(), outcome.confirmation());
    if let Some(notice) = &snapshot.notice {
        println!("  {} {}", style("!").yellow().bold(), notice);
    }
    println!();

    if snapshot.log.is_empty() {
        println!("  {}", style("No messages yet.").dim());
        println!();
        return Ok(());
    }

    let renderer = ChatRenderer::new();
    renderer.print_log(&snapshot.log);
    Ok(())
}
