//! Observable controller state.
//!
//! A `ConversationSnapshot` is everything the presentation layer needs to
//! draw the chat: who the session is, what the log says, whether a request
//! is in flight, the last notice, and the two input buffers.

use serde::Serialize;
use std::fmt;

use advisor_types::message::ConversationLog;
use advisor_types::session::SessionId;

pub(crate) const SESSION_NOT_FOUND_NOTICE: &str = "Session ID not found. Check the ID you entered and \
     try again, or leave it blank to start a new session.";
pub(crate) const SESSION_UNREACHABLE_NOTICE: &str =
    "Failed to connect to session service. Please try again later.";
pub(crate) const GREETING_FAILED_NOTICE: &str =
    "Failed to get initial AI greeting. Please type a message to start.";
pub(crate) const SEND_FAILED_NOTICE: &str = "Failed to get an AI response. Please try again.";
pub(crate) const NO_SESSION_NOTICE: &str = "Please start or load a session first.";
pub(crate) const EMPTY_MESSAGE_NOTICE: &str = "Please type a message to send.";

/// Classification of a surfaced failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Resuming with a token the service does not know.
    SessionNotFound,
    /// Any other failure reaching the service.
    ServiceUnreachable,
    /// The automatic greeting for a new session failed. Non-fatal.
    GreetingFailed,
    /// Rejected locally before any request was made.
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::SessionNotFound => write!(f, "session_not_found"),
            ErrorKind::ServiceUnreachable => write!(f, "service_unreachable"),
            ErrorKind::GreetingFailed => write!(f, "greeting_failed"),
            ErrorKind::Validation => write!(f, "validation"),
        }
    }
}

/// The user-visible message for the most recent failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: ErrorKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Coarse controller state, matching the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NoSession,
    Idle,
    Busy,
}

/// Read-only view of the controller's state at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationSnapshot {
    pub session_id: Option<SessionId>,
    pub log: ConversationLog,
    pub busy: bool,
    pub notice: Option<Notice>,
    /// Contents of the "previous session ID" input field.
    pub session_token_draft: String,
    /// Contents of the message input box.
    pub message_draft: String,
}

impl ConversationSnapshot {
    pub fn status(&self) -> SessionStatus {
        match (&self.session_id, self.busy) {
            (_, true) => SessionStatus::Busy,
            (None, false) => SessionStatus::NoSession,
            (Some(_), false) => SessionStatus::Idle,
        }
    }

    pub fn has_session(&self) -> bool {
        self.session_id.is_some()
    }

    /// Whether the "start session" control should be enabled.
    pub fn can_start_session(&self) -> bool {
        !self.busy && self.session_id.is_none()
    }

    /// Whether the message input box should accept typing.
    pub fn can_type(&self) -> bool {
        !self.busy && self.session_id.is_some()
    }

    /// Whether the "send" control should be enabled.
    pub fn can_send(&self) -> bool {
        self.can_type() && !self.message_draft.trim().is_empty()
    }

    /// `Session ID: <token>` or `No Session`.
    pub fn session_label(&self) -> String {
        match &self.session_id {
            Some(id) => format!("Session ID: {id}"),
            None => "No Session".to_string(),
        }
    }
}
