//! BoxAdvisorService -- object-safe dynamic dispatch wrapper for AdvisorService.
//!
//! 1. `AdvisorServiceDyn` mirrors the port with boxed futures
//! 2. Blanket-impl `AdvisorServiceDyn` for all `T: AdvisorService`
//! 3. `BoxAdvisorService` wraps `Box<dyn AdvisorServiceDyn>` and implements
//!    `AdvisorService` itself, so it can drive a `SessionController`

use std::future::Future;
use std::pin::Pin;

use advisor_types::error::AdvisorError;
use advisor_types::message::Message;
use advisor_types::session::{LoadedSession, SessionId};

use super::service::AdvisorService;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`AdvisorService`] with boxed futures.
pub trait AdvisorServiceDyn: Send + Sync {
    fn get_session_boxed<'a>(
        &'a self,
        session_id: Option<&'a SessionId>,
    ) -> BoxFuture<'a, Result<LoadedSession, AdvisorError>>;

    fn chat_boxed<'a>(
        &'a self,
        session_id: &'a SessionId,
        contents: &'a [Message],
    ) -> BoxFuture<'a, Result<Vec<Message>, AdvisorError>>;
}

impl<T: AdvisorService> AdvisorServiceDyn for T {
    fn get_session_boxed<'a>(
        &'a self,
        session_id: Option<&'a SessionId>,
    ) -> BoxFuture<'a, Result<LoadedSession, AdvisorError>> {
        Box::pin(self.get_session(session_id))
    }

    fn chat_boxed<'a>(
        &'a self,
        session_id: &'a SessionId,
        contents: &'a [Message],
    ) -> BoxFuture<'a, Result<Vec<Message>, AdvisorError>> {
        Box::pin(self.chat(session_id, contents))
    }
}

/// Type-erased advisor service.
///
/// `AdvisorService` uses RPITIT and cannot be a trait object, so the binary
/// holds one of these and picks the concrete implementation at startup.
pub struct BoxAdvisorService {
    inner: Box<dyn AdvisorServiceDyn>,
}

impl BoxAdvisorService {
    pub fn new<T: AdvisorService + 'static>(service: T) -> Self {
        Self {
            inner: Box::new(service),
        }
    }
}

impl AdvisorService for BoxAdvisorService {
    async fn get_session(
        &self,
        session_id: Option<&SessionId>,
    ) -> Result<LoadedSession, AdvisorError> {
        self.inner.get_session_boxed(session_id).await
    }

    async fn chat(
        &self,
        session_id: &SessionId,
        contents: &[Message],
    ) -> Result<Vec<Message>, AdvisorError> {
        self.inner.chat_boxed(session_id, contents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes the request back as the history.
    struct EchoAdvisor;

    impl AdvisorService for EchoAdvisor {
        async fn get_session(
            &self,
            session_id: Option<&SessionId>,
        ) -> Result<LoadedSession, AdvisorError> {
            match session_id {
                Some(id) if id.as_str() == "missing" => Err(AdvisorError::SessionNotFound {
                    session_id: Some(id.clone()),
                }),
                Some(id) => Ok(LoadedSession {
                    session_id: id.clone(),
                    history: Vec::new(),
                }),
                None => Ok(LoadedSession {
                    session_id: SessionId::new("fresh"),
                    history: Vec::new(),
                }),
            }
        }

        async fn chat(
            &self,
            _session_id: &SessionId,
            contents: &[Message],
        ) -> Result<Vec<Message>, AdvisorError> {
            let mut history = contents.to_vec();
            history.push(Message::model("echo"));
            Ok(history)
        }
    }

    #[tokio::test]
    async fn test_box_delegates_get_session() {
        let service = BoxAdvisorService::new(EchoAdvisor);
        let loaded = service.get_session(None).await.unwrap();
        assert_eq!(loaded.session_id.as_str(), "fresh");

        let missing = SessionId::new("missing");
        let err = service.get_session(Some(&missing)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_box_delegates_chat() {
        let service = BoxAdvisorService::new(EchoAdvisor);
        let history = service
            .chat(&SessionId::new("abc123"), &[Message::user("hello")])
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1], Message::model("echo"));
    }
}
