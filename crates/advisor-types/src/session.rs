//! Opaque session identity handed out by the advisor service.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::message::Message;

/// Token identifying a server-side conversation.
///
/// The client never interprets it; it is either returned by the service when
/// a session is created or typed in by the user to resume one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a raw token as-is.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Parse user input into a token.
    ///
    /// Surrounding whitespace is dropped. Blank input yields `None`, which
    /// callers treat as "start a new session".
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A session as reported by `GET session`: its identity and the full
/// server-side history, exactly as returned (start trigger included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSession {
    pub session_id: SessionId,
    pub history: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_input() {
        let id = SessionId::parse("  abc123 \n").unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn test_parse_blank_is_none() {
        assert!(SessionId::parse("").is_none());
        assert!(SessionId::parse("   \t").is_none());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = SessionId::new("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
    }
}
