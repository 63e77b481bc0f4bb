//! Welcome and farewell banners for chat sessions.

use console::style;

/// Print the welcome banner before a session is chosen.
pub fn print_welcome_banner(base_url: &str) {
    println!();
    println!("  {}", style("Interview Advisor").cyan().bold());
    println!(
        "  {}",
        style("Practice interviews and get feedback from an AI advisor.").dim()
    );
    println!();
    println!("  {}  {}", style("Service:").bold(), style(base_url).dim());
    println!();
}

/// Print the session line and the input hint once a session is active.
pub fn print_session_banner(confirmation: &str, session_label: &str) {
    println!();
    println!("  {} {}", style("*").green().bold(), confirmation);
    println!("  {}", style(session_label).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Print the goodbye line with the command that resumes this session.
pub fn print_farewell(session_id: Option<&str>) {
    println!();
    println!("  {}", style("Session ended.").dim());
    if let Some(id) = session_id {
        println!(
            "  {} {}",
            style("Resume later with:").dim(),
            style(format!("advisor chat --session {id}")).yellow()
        );
    }
    println!();
}
