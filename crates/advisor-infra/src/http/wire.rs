//! JSON wire format of the advisor service.
//!
//! Messages travel as `{ "role": "user" | "model", "parts": [{ "text": ... }] }`
//! and the envelope fields are camelCase. Nothing outside this module sees
//! the nested `parts` shape.

use serde::{Deserialize, Serialize};

use advisor_types::error::AdvisorError;
use advisor_types::message::{Message, Role};
use advisor_types::session::{LoadedSession, SessionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub parts: Vec<WirePart>,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role(),
            parts: vec![WirePart {
                text: message.text().to_string(),
            }],
        }
    }
}

impl From<WireMessage> for Message {
    /// Multiple parts are concatenated in order.
    fn from(wire: WireMessage) -> Self {
        let text = wire
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");
        Message::new(wire.role, text)
    }
}

fn into_messages(history: Vec<WireMessage>) -> Vec<Message> {
    history.into_iter().map(Message::from).collect()
}

/// Body of `GET /session`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    /// `null` or absent for a brand-new session.
    #[serde(default)]
    pub conversation_history: Option<Vec<WireMessage>>,
}

impl SessionResponse {
    pub fn into_loaded(self) -> Result<LoadedSession, AdvisorError> {
        let session_id = SessionId::parse(&self.session_id).ok_or_else(|| {
            AdvisorError::Deserialization("session response has an empty sessionId".to_string())
        })?;
        Ok(LoadedSession {
            session_id,
            history: into_messages(self.conversation_history.unwrap_or_default()),
        })
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest<'a> {
    pub session_id: &'a str,
    pub contents: Vec<WireMessage>,
}

impl<'a> ChatRequest<'a> {
    pub fn new(session_id: &'a SessionId, contents: &[Message]) -> Self {
        Self {
            session_id: session_id.as_str(),
            contents: contents.iter().map(WireMessage::from).collect(),
        }
    }
}

/// Response of `POST /chat`: the service's full, authoritative history.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(default)]
    pub conversation_history: Option<Vec<WireMessage>>,
}

impl ChatResponse {
    pub fn into_history(self) -> Result<Vec<Message>, AdvisorError> {
        self.conversation_history.map(into_messages).ok_or_else(|| {
            AdvisorError::Deserialization(
                "chat response is missing conversationHistory".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_to_wire_shape() {
        let wire = WireMessage::from(&Message::start_trigger());
        assert_eq!(
            serde_json::to_value(&wire).unwrap(),
            json!({ "role": "user", "parts": [{ "text": "start_conversation" }] })
        );
    }

    #[test]
    fn test_wire_parts_are_concatenated() {
        let wire: WireMessage = serde_json::from_value(json!({
            "role": "model",
            "parts": [{ "text": "Hello, " }, { "text": "candidate." }]
        }))
        .unwrap();
        assert_eq!(Message::from(wire), Message::model("Hello, candidate."));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = serde_json::from_value::<WireMessage>(json!({
            "role": "system",
            "parts": [{ "text": "x" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_chat_request_body() {
        let id = SessionId::new("abc123");
        let request = ChatRequest::new(&id, &[Message::model("Hi"), Message::user("hello")]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "sessionId": "abc123",
                "contents": [
                    { "role": "model", "parts": [{ "text": "Hi" }] },
                    { "role": "user", "parts": [{ "text": "hello" }] }
                ]
            })
        );
    }

    #[test]
    fn test_session_response_null_history_is_empty() {
        let response: SessionResponse =
            serde_json::from_value(json!({ "sessionId": "abc123", "conversationHistory": null }))
                .unwrap();
        let loaded = response.into_loaded().unwrap();
        assert_eq!(loaded.session_id.as_str(), "abc123");
        assert!(loaded.history.is_empty());
    }

    #[test]
    fn test_session_response_keeps_trigger() {
        let response: SessionResponse = serde_json::from_value(json!({
            "sessionId": "abc123",
            "conversationHistory": [
                { "role": "user", "parts": [{ "text": "start_conversation" }] },
                { "role": "model", "parts": [{ "text": "Hi!" }] }
            ],
            "initialGreeting": "ignored"
        }))
        .unwrap();
        let loaded = response.into_loaded().unwrap();
        assert_eq!(loaded.history.len(), 2);
        assert!(loaded.history[0].is_start_trigger());
    }

    #[test]
    fn test_session_response_blank_id_is_error() {
        let response: SessionResponse =
            serde_json::from_value(json!({ "sessionId": "  " })).unwrap();
        assert!(matches!(
            response.into_loaded(),
            Err(AdvisorError::Deserialization(_))
        ));
    }

    #[test]
    fn test_chat_response_without_history_is_error() {
        let response: ChatResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            response.into_history(),
            Err(AdvisorError::Deserialization(_))
        ));
    }
}
