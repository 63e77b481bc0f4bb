use thiserror::Error;

use crate::session::SessionId;

/// Failures talking to the advisor service.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// `GET session` answered 404: the token is unknown to the service.
    #[error("advisor session not found")]
    SessionNotFound { session_id: Option<SessionId> },

    #[error("advisor service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("advisor service request failed: {0}")]
    Transport(String),

    #[error("failed to decode advisor response: {0}")]
    Deserialization(String),
}

impl AdvisorError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdvisorError::SessionNotFound { .. })
    }
}
