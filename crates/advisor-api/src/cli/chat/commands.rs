//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and never reach the advisor.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Print the whole conversation as a plain transcript.
    History,
    /// Show the active session ID.
    Session,
    /// Clear the terminal screen.
    Clear,
    /// Leave the chat. The session stays on the server.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/history" | "/transcript" => Some(ChatCommand::History),
        "/session" | "/id" => Some(ChatCommand::Session),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}     Show this help message", style("/help").cyan());
    println!("  {}  Show the conversation so far", style("/history").cyan());
    println!("  {}  Show the session ID", style("/session").cyan());
    println!("  {}    Clear the screen", style("/clear").cyan());
    println!("  {}     Leave the chat", style("/exit").cyan());
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit. Resume later with the session ID.").dim()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_history_and_session() {
        assert_eq!(parse("/history"), Some(ChatCommand::History));
        assert_eq!(parse("/session"), Some(ChatCommand::Session));
        assert_eq!(parse("/id"), Some(ChatCommand::Session));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_ignores_args() {
        assert_eq!(parse("  /HELP now "), Some(ChatCommand::Help));
        assert_eq!(parse("/clear all"), Some(ChatCommand::Clear));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse("/remember this"),
            Some(ChatCommand::Unknown("/remember".to_string()))
        );
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(parse("How should I answer behavioral questions?"), None);
        assert_eq!(parse("a/b"), None);
    }
}
