//! HttpAdvisorService -- concrete [`AdvisorService`] over the advisor's REST API.
//!
//! - `GET {base}/session[?sessionId=<token>]` loads or creates a session
//! - `POST {base}/chat` with `{ sessionId, contents }` runs one exchange
//!
//! There is no request timeout and no retry: a hung request keeps the
//! controller busy until the server answers or the connection drops.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::Instrument;

use advisor_core::advisor::service::AdvisorService;
use advisor_types::config::ClientConfig;
use advisor_types::error::AdvisorError;
use advisor_types::message::Message;
use advisor_types::session::{LoadedSession, SessionId};

use super::wire::{ChatRequest, ChatResponse, SessionResponse};

pub struct HttpAdvisorService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAdvisorService {
    /// Build a client for the service described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, AdvisorError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| AdvisorError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn a non-success response into [`AdvisorError::Status`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AdvisorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AdvisorError::Status {
        status: status.as_u16(),
        body,
    })
}

fn transport(err: reqwest::Error) -> AdvisorError {
    AdvisorError::Transport(format!("HTTP request failed: {err}"))
}

impl AdvisorService for HttpAdvisorService {
    async fn get_session(
        &self,
        session_id: Option<&SessionId>,
    ) -> Result<LoadedSession, AdvisorError> {
        let span = tracing::info_span!(
            "advisor.get_session",
            session_id = session_id.map(SessionId::as_str),
            status = tracing::field::Empty,
        );

        async {
            let mut request = self.client.get(self.url("/session"));
            if let Some(id) = session_id {
                request = request.query(&[("sessionId", id.as_str())]);
            }

            let response = request.send().await.map_err(transport)?;
            let status = response.status();
            tracing::Span::current().record("status", status.as_u16());

            if status == StatusCode::NOT_FOUND {
                tracing::debug!("Advisor service does not know this session");
                return Err(AdvisorError::SessionNotFound {
                    session_id: session_id.cloned(),
                });
            }

            let body: SessionResponse = check_status(response)
                .await?
                .json()
                .await
                .map_err(|e| AdvisorError::Deserialization(format!("session response: {e}")))?;
            let loaded = body.into_loaded()?;

            tracing::debug!(
                session_id = %loaded.session_id,
                history_len = loaded.history.len(),
                "Session loaded"
            );
            Ok(loaded)
        }
        .instrument(span)
        .await
    }

    async fn chat(
        &self,
        session_id: &SessionId,
        contents: &[Message],
    ) -> Result<Vec<Message>, AdvisorError> {
        let span = tracing::info_span!(
            "advisor.chat",
            session_id = %session_id,
            contents_len = contents.len(),
            status = tracing::field::Empty,
        );

        async {
            let body = ChatRequest::new(session_id, contents);
            let response = self
                .client
                .post(self.url("/chat"))
                .json(&body)
                .send()
                .await
                .map_err(transport)?;
            tracing::Span::current().record("status", response.status().as_u16());

            let body: ChatResponse = check_status(response)
                .await?
                .json()
                .await
                .map_err(|e| AdvisorError::Deserialization(format!("chat response: {e}")))?;
            let history = body.into_history()?;

            tracing::debug!(history_len = history.len(), "Chat exchange complete");
            Ok(history)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::http::StatusCode as AxumStatus;
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    /// What the fake advisor saw.
    #[derive(Clone, Default)]
    struct Recorded {
        session_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
        chat_bodies: Arc<Mutex<Vec<Value>>>,
    }

    async fn session_route(
        State(recorded): State<Recorded>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        recorded.session_queries.lock().unwrap().push(params.clone());
        match params.get("sessionId").map(String::as_str) {
            None => Json(json!({ "sessionId": "abc123", "conversationHistory": [] }))
                .into_response(),
            Some("zzz") => (
                AxumStatus::NOT_FOUND,
                Json(json!({ "error": "Session not found" })),
            )
                .into_response(),
            Some("blank") => Json(json!({ "sessionId": "" })).into_response(),
            Some(id) => Json(json!({
                "sessionId": id,
                "conversationHistory": [
                    { "role": "user", "parts": [{ "text": "start_conversation" }] },
                    { "role": "model", "parts": [{ "text": "Welcome back." }] }
                ]
            }))
            .into_response(),
        }
    }

    async fn chat_route(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Response {
        recorded.chat_bodies.lock().unwrap().push(body.clone());
        if body["sessionId"] == "broken" {
            return (AxumStatus::INTERNAL_SERVER_ERROR, "model unavailable").into_response();
        }
        let mut history = body["contents"].as_array().cloned().unwrap_or_default();
        history.push(json!({ "role": "model", "parts": [{ "text": "Tell me more." }] }));
        Json(json!({ "conversationHistory": history })).into_response()
    }

    /// Fake advisor service on an ephemeral local port.
    async fn spawn_advisor() -> (SocketAddr, Recorded) {
        let recorded = Recorded::default();
        let app = Router::new()
            .route("/session", get(session_route))
            .route("/chat", post(chat_route))
            .with_state(recorded.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, recorded)
    }

    fn client_for(addr: SocketAddr) -> HttpAdvisorService {
        let config = ClientConfig::default().with_base_url_override(Some(format!("http://{addr}/")));
        HttpAdvisorService::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_new_session_sends_no_query() {
        let (addr, recorded) = spawn_advisor().await;
        let service = client_for(addr);

        let loaded = service.get_session(None).await.unwrap();

        assert_eq!(loaded.session_id.as_str(), "abc123");
        assert!(loaded.history.is_empty());
        let queries = recorded.session_queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].is_empty());
    }

    #[tokio::test]
    async fn test_resume_passes_session_id_query() {
        let (addr, recorded) = spawn_advisor().await;
        let service = client_for(addr);

        let id = SessionId::new("abc 123&x");
        let loaded = service.get_session(Some(&id)).await.unwrap();

        assert_eq!(loaded.session_id, id);
        assert_eq!(loaded.history.len(), 2);
        assert!(loaded.history[0].is_start_trigger());
        let queries = recorded.session_queries.lock().unwrap();
        assert_eq!(queries[0].get("sessionId").map(String::as_str), Some("abc 123&x"));
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let (addr, _) = spawn_advisor().await;
        let service = client_for(addr);

        let id = SessionId::new("zzz");
        let err = service.get_session(Some(&id)).await.unwrap_err();

        match err {
            AdvisorError::SessionNotFound { session_id } => assert_eq!(session_id, Some(id)),
            other => panic!("expected SessionNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_session_id_in_response_is_rejected() {
        let (addr, _) = spawn_advisor().await;
        let service = client_for(addr);

        let err = service
            .get_session(Some(&SessionId::new("blank")))
            .await
            .unwrap_err();

        assert!(matches!(err, AdvisorError::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_chat_body_shape_and_history() {
        let (addr, recorded) = spawn_advisor().await;
        let service = client_for(addr);

        let history = service
            .chat(&SessionId::new("abc123"), &[Message::start_trigger()])
            .await
            .unwrap();

        assert_eq!(history.len(), 2);
        assert!(history[0].is_start_trigger());
        assert_eq!(history[1], Message::model("Tell me more."));

        let bodies = recorded.chat_bodies.lock().unwrap();
        assert_eq!(
            bodies[0],
            json!({
                "sessionId": "abc123",
                "contents": [{ "role": "user", "parts": [{ "text": "start_conversation" }] }]
            })
        );
    }

    #[tokio::test]
    async fn test_chat_server_error_is_status() {
        let (addr, _) = spawn_advisor().await;
        let service = client_for(addr);

        let err = service
            .chat(&SessionId::new("broken"), &[Message::user("hello")])
            .await
            .unwrap_err();

        match err {
            AdvisorError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "model unavailable");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Bind and release a port so nothing is listening on it.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let service = client_for(addr);

        let err = service.get_session(None).await.unwrap_err();

        assert!(matches!(err, AdvisorError::Transport(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = ClientConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..ClientConfig::default()
        };
        let service = HttpAdvisorService::new(&config).unwrap();
        assert_eq!(service.base_url(), "http://localhost:5000");
        assert_eq!(service.url("/chat"), "http://localhost:5000/chat");
    }
}
