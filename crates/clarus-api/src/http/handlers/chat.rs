//! Chat handler: answer a message and save the exchange.
//!
//! Endpoint:
//! - POST /chat - Reply to a user message in the context of its session

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use clarus_types::chat::NewExchange;
use clarus_types::llm::ChatMode;

use crate::http::error::AppError;
use crate::http::extractors::json::{JsonBody, string_or_number};
use crate::state::AppState;

/// Session used when the client sends none.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Body of `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

impl ChatRequest {
    fn session_id(&self) -> String {
        self.session_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SESSION_ID)
            .to_string()
    }

    fn mode(&self) -> ChatMode {
        self.mode
            .as_deref()
            .map(ChatMode::from_name)
            .unwrap_or_default()
    }
}

/// POST /chat - Reply to `message`, then save the exchange.
///
/// Always answers 200 with a reply once the body parses. History that cannot
/// be read is treated as empty, and a save that fails is only logged.
pub async fn chat(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ChatRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let session_id = req.session_id();
    let mode = req.mode();
    let message = req.message.unwrap_or_default();

    let history = match state.chat_service.history(&session_id).await {
        Ok(history) => history,
        Err(e) => {
            tracing::warn!(session_id = %session_id, error = %e, "History unavailable, replying without context");
            Vec::new()
        }
    };

    let reply = state.assistant.reply(&message, mode, &history).await;
    tracing::debug!(session_id = %session_id, source = ?reply.source, "Chat reply ready");

    let exchange = NewExchange {
        session_id: session_id.clone(),
        user_id: req.user_id,
        user_message: message,
        assistant_reply: reply.text.clone(),
    };
    if let Err(e) = state.chat_service.record_exchange(exchange).await {
        tracing::warn!(session_id = %session_id, error = %e, "Failed to save chat exchange");
    }

    Ok((StatusCode::OK, Json(json!({ "reply": reply.text }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: Value) -> ChatRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let req = parse(json!({}));
        assert_eq!(req.session_id(), DEFAULT_SESSION_ID);
        assert_eq!(req.mode(), ChatMode::Prof);
        assert!(req.message.is_none());
        assert!(req.user_id.is_none());
    }

    #[test]
    fn test_blank_session_id_uses_default() {
        assert_eq!(parse(json!({ "session_id": "  " })).session_id(), DEFAULT_SESSION_ID);
    }

    #[test]
    fn test_numeric_ids_and_mode() {
        let req = parse(json!({ "session_id": 9, "user_id": 3, "mode": "exam" }));
        assert_eq!(req.session_id(), "9");
        assert_eq!(req.user_id.as_deref(), Some("3"));
        assert_eq!(req.mode(), ChatMode::Exam);
    }

    #[test]
    fn test_unknown_mode_is_neutral() {
        assert_eq!(parse(json!({ "mode": "pirate" })).mode(), ChatMode::Neutral);
    }
}
