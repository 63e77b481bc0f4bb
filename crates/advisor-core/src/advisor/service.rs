//! AdvisorService trait definition.
//!
//! The two operations the advisor service exposes: load-or-create a session
//! and run one chat exchange. Uses native async fn in traits (RPITIT, Rust
//! 2024 edition); implementations live in `advisor-infra`.

use advisor_types::error::AdvisorError;
use advisor_types::message::Message;
use advisor_types::session::{LoadedSession, SessionId};

/// Remote session storage plus response generation.
///
/// Both operations return raw server histories. Stripping the start trigger
/// and reconciling with local state is the caller's job.
pub trait AdvisorService: Send + Sync {
    /// Load the session identified by `session_id`, or create a new one
    /// when `None`.
    ///
    /// An unknown token fails with [`AdvisorError::SessionNotFound`].
    fn get_session(
        &self,
        session_id: Option<&SessionId>,
    ) -> impl std::future::Future<Output = Result<LoadedSession, AdvisorError>> + Send;

    /// Send the full conversation (newest user turn last) and receive the
    /// service's authoritative history in return.
    fn chat(
        &self,
        session_id: &SessionId,
        contents: &[Message],
    ) -> impl std::future::Future<Output = Result<Vec<Message>, AdvisorError>> + Send;
}
