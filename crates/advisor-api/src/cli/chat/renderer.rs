//! Terminal rendering of the conversation.
//!
//! Advisor replies are markdown and go through `termimad`; the user's own
//! messages are printed as typed.

use console::style;
use termimad::MadSkin;

use advisor_core::conversation::snapshot::Notice;
use advisor_types::message::{ConversationLog, Message, Role};

/// Terminal markdown renderer for conversation messages.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(termimad::crossterm::style::Color::Cyan);
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        Self { skin }
    }

    /// Render markdown to a terminal string.
    pub fn render(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }

    pub fn print_message(&self, message: &Message) {
        match message.role() {
            Role::Model => {
                println!("  {}", style(message.speaker()).cyan().bold());
                println!("{}", self.render(message.text()).trim_end());
            }
            Role::User => {
                println!(
                    "  {} {}",
                    style(format!("{}:", message.speaker())).green().bold(),
                    message.text()
                );
            }
        }
        println!();
    }

    pub fn print_log(&self, log: &ConversationLog) {
        for message in log {
            self.print_message(message);
        }
    }

    /// Print the advisor's latest replies: every message after the last
    /// user turn.
    pub fn print_replies(&self, log: &ConversationLog) {
        let replies = trailing_replies(log);
        if replies.is_empty() {
            println!("  {}", style("(no reply)").dim());
            println!();
        }
        for message in replies {
            self.print_message(message);
        }
    }

    pub fn print_notice(&self, notice: &Notice) {
        eprintln!("  {} {}", style("!").yellow().bold(), notice);
        eprintln!();
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Messages after the last user message.
fn trailing_replies(log: &ConversationLog) -> &[Message] {
    let messages = log.messages();
    let start = messages
        .iter()
        .rposition(|m| m.role() == Role::User)
        .map_or(0, |i| i + 1);
    &messages[start..]
}
