use thiserror::Error;

use advisor_types::error::AdvisorError;
use advisor_types::session::SessionId;

use super::snapshot::{
    EMPTY_MESSAGE_NOTICE, ErrorKind, NO_SESSION_NOTICE, Notice, SEND_FAILED_NOTICE,
    SESSION_NOT_FOUND_NOTICE, SESSION_UNREACHABLE_NOTICE,
};

/// Which controller operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    BeginSession,
    SendMessage,
}

impl Operation {
    fn unreachable_message(self) -> &'static str {
        match self {
            Operation::BeginSession => SESSION_UNREACHABLE_NOTICE,
            Operation::SendMessage => SEND_FAILED_NOTICE,
        }
    }
}

/// Input rejected before contacting the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", NO_SESSION_NOTICE)]
    NoActiveSession,

    #[error("{}", EMPTY_MESSAGE_NOTICE)]
    EmptyMessage,
}

/// Outcome of a controller operation that did not succeed.
///
/// By the time one of these is returned the controller has already repaired
/// its state and published the matching notice.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("{}", SESSION_NOT_FOUND_NOTICE)]
    SessionNotFound { session_id: Option<SessionId> },

    #[error("{}", .operation.unreachable_message())]
    ServiceUnreachable {
        operation: Operation,
        #[source]
        source: AdvisorError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another begin or send is in flight. Nothing was changed.
    #[error("another request is still in flight")]
    Busy,

    /// Begin was called while a session is already active. Nothing was changed.
    #[error("a session is already active")]
    SessionAlreadyActive,
}

impl ConversationError {
    /// Classify a service failure for the given operation.
    ///
    /// Only a not-found answer while loading a session is treated as an
    /// unknown token; everything else means the service is unreachable.
    pub fn from_service(operation: Operation, source: AdvisorError) -> Self {
        match (operation, source) {
            (Operation::BeginSession, AdvisorError::SessionNotFound { session_id }) => {
                ConversationError::SessionNotFound { session_id }
            }
            (operation, source) => ConversationError::ServiceUnreachable { operation, source },
        }
    }

    /// `None` for rejections that leave state untouched.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ConversationError::SessionNotFound { .. } => Some(ErrorKind::SessionNotFound),
            ConversationError::ServiceUnreachable { .. } => Some(ErrorKind::ServiceUnreachable),
            ConversationError::Validation(_) => Some(ErrorKind::Validation),
            ConversationError::Busy | ConversationError::SessionAlreadyActive => None,
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        self.kind().map(|kind| Notice::new(kind, self.to_string()))
    }

    /// Rejections are ignored invocations rather than failures.
    pub fn is_rejection(&self) -> bool {
        self.kind().is_none()
    }
}
