//! Conversation messages and the reconciled conversation log.
//!
//! These are the client-side shapes. The advisor service nests message text
//! inside a `parts` array on the wire; that shape is translated at the HTTP
//! boundary in `advisor-infra` and never appears here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text of the synthetic user message that prompts the advisor's opening
/// greeting. It is sent once for brand-new sessions and never displayed.
pub const START_CONVERSATION: &str = "start_conversation";

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Model => write!(f, "model"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "model" => Ok(Role::Model),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single turn in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    text: String,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    /// The synthetic `start_conversation` trigger.
    pub fn start_trigger() -> Self {
        Self::user(START_CONVERSATION)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this is the synthetic greeting trigger.
    pub fn is_start_trigger(&self) -> bool {
        self.role == Role::User && self.text == START_CONVERSATION
    }

    /// Label shown in front of the message in a plain-text transcript.
    pub fn speaker(&self) -> &'static str {
        match self.role {
            Role::User => "You",
            Role::Model => "Advisor",
        }
    }
}

/// Ordered conversation history, oldest first.
///
/// A log built from server data via [`ConversationLog::from_server`] never
/// starts with the start trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationLog(Vec<Message>);

impl ConversationLog {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adopt a history returned by the advisor service.
    ///
    /// A leading start trigger is dropped; everything else is kept verbatim
    /// and in the order the server sent it.
    pub fn from_server(mut history: Vec<Message>) -> Self {
        if history.first().is_some_and(Message::is_start_trigger) {
            history.remove(0);
        }
        Self(history)
    }

    /// A copy of this log with `message` appended.
    pub fn with_appended(&self, message: Message) -> Self {
        let mut messages = self.0.clone();
        messages.push(message);
        Self(messages)
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.0.last()
    }

    /// Plain-text rendering: `You: ...` / `Advisor: ...` blocks separated by
    /// a blank line.
    pub fn transcript(&self) -> String {
        self.0
            .iter()
            .map(|m| format!("{}: {}", m.speaker(), m.text()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl From<Vec<Message>> for ConversationLog {
    fn from(messages: Vec<Message>) -> Self {
        Self(messages)
    }
}

impl<'a> IntoIterator for &'a ConversationLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::User, Role::Model] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
        assert!("assistant".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
    }

    #[test]
    fn test_start_trigger_detection() {
        assert!(Message::start_trigger().is_start_trigger());
        assert!(!Message::model(START_CONVERSATION).is_start_trigger());
        assert!(!Message::user("start conversation").is_start_trigger());
    }

    #[test]
    fn test_from_server_strips_leading_trigger() {
        let log = ConversationLog::from_server(vec![
            Message::start_trigger(),
            Message::model("Welcome! What role are you preparing for?"),
        ]);
        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].role(), Role::Model);
    }

    #[test]
    fn test_from_server_keeps_history_without_trigger() {
        let history = vec![Message::model("Hi"), Message::user("hello")];
        let log = ConversationLog::from_server(history.clone());
        assert_eq!(log.messages(), history.as_slice());
    }

    #[test]
    fn test_from_server_only_strips_the_front() {
        let log = ConversationLog::from_server(vec![
            Message::model("Hi"),
            Message::start_trigger(),
        ]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_from_server_empty() {
        assert!(ConversationLog::from_server(Vec::new()).is_empty());
    }

    #[test]
    fn test_with_appended_leaves_original_untouched() {
        let confirmed = ConversationLog::from(vec![Message::model("Hi")]);
        let optimistic = confirmed.with_appended(Message::user("hello"));
        assert_eq!(confirmed.len(), 1);
        assert_eq!(optimistic.len(), 2);
        assert_eq!(optimistic.last().unwrap().text(), "hello");
    }

    #[test]
    fn test_transcript_format() {
        let log = ConversationLog::from(vec![
            Message::model("Tell me about yourself."),
            Message::user("I write Rust."),
        ]);
        assert_eq!(
            log.transcript(),
            "Advisor: Tell me about yourself.\n\nYou: I write Rust."
        );
    }
}
