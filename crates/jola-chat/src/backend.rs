//! The chat service seam and its wire types.

use async_trait::async_trait;
use jola_core::entities::ChatMessage;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// Reply to `POST /chat`. `history`, when present, is the full conversation
/// so far and replaces the client's copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
    #[serde(default)]
    pub history: Option<Vec<ChatMessage>>,
}

/// Body of `GET /chat/{id}/history`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatHistory {
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// Result of a history lookup. An unknown session is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    Found(Vec<ChatMessage>),
    NotFound,
}

/// Result of ending a session. Ending an unknown session is a normal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOutcome {
    Ended,
    NotFound,
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn history(&self, session_id: &str) -> Result<HistoryOutcome, ChatError>;

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError>;

    async fn end(&self, session_id: &str) -> Result<EndOutcome, ChatError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn response_history_is_optional() {
        let response: ChatResponse =
            serde_json::from_value(json!({"response": "hi", "session_id": "s1"})).unwrap();
        assert_eq!(response.history, None);

        let response: ChatResponse = serde_json::from_value(json!({
            "response": "hi",
            "session_id": "s1",
            "history": [{"role": "human", "content": "hello"}, {"role": "ai", "content": "hi"}]
        }))
        .unwrap();
        assert_eq!(
            response.history,
            Some(vec![ChatMessage::human("hello"), ChatMessage::ai("hi")])
        );
    }

    #[test]
    fn request_wire_shape() {
        let request = ChatRequest {
            message: "What do users hate?".into(),
            session_id: "s1".into(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"message": "What do users hate?", "session_id": "s1"})
        );
    }
}
