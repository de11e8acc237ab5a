//! Message recording handler.
//!
//! Endpoint:
//! - POST /messages - Store a user message and the assistant's reply

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use clarus_types::chat::NewExchange;

use crate::http::error::AppError;
use crate::http::extractors::json::{JsonBody, string_or_number};
use crate::state::AppState;

/// Body of `POST /messages`.
///
/// Required fields are optional here so that a missing one reaches the
/// service's validation and is reported by name.
#[derive(Debug, Deserialize)]
pub struct RecordMessagesRequest {
    #[serde(default, deserialize_with = "string_or_number")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default)]
    pub assistant_reply: Option<String>,
}

impl RecordMessagesRequest {
    pub fn into_exchange(self) -> NewExchange {
        NewExchange {
            session_id: self.session_id.unwrap_or_default(),
            user_id: self.user_id,
            user_message: self.user_message.unwrap_or_default(),
            assistant_reply: self.assistant_reply.unwrap_or_default(),
        }
    }
}

/// POST /messages - Record one exchange, creating the session on first use.
pub async fn record_messages(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RecordMessagesRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    state.chat_service.record_exchange(req.into_exchange()).await?;

    Ok((StatusCode::CREATED, Json(json!({ "status": "ok" }))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: Value) -> Result<RecordMessagesRequest, serde_json::Error> {
        serde_json::from_value(body)
    }

    #[test]
    fn test_missing_fields_become_empty_strings() {
        let exchange = parse(json!({ "session_id": "s1" })).unwrap().into_exchange();
        assert_eq!(exchange.session_id, "s1");
        assert_eq!(exchange.user_message, "");
        assert_eq!(exchange.assistant_reply, "");
        assert_eq!(exchange.user_id, None);
    }

    #[test]
    fn test_numeric_user_id_is_stringified() {
        let req = parse(json!({ "user_id": 42 })).unwrap();
        assert_eq!(req.user_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_null_user_id_is_absent() {
        let req = parse(json!({ "user_id": null })).unwrap();
        assert_eq!(req.user_id, None);
    }

    #[test]
    fn test_numeric_session_id_is_stringified() {
        let exchange = parse(json!({
            "session_id": 123,
            "user_message": "hi",
            "assistant_reply": "hello"
        }))
        .unwrap()
        .into_exchange();
        assert_eq!(exchange.session_id, "123");
    }

    #[test]
    fn test_boolean_session_id_is_rejected() {
        assert!(parse(json!({ "session_id": true })).is_err());
    }

    #[test]
    fn test_object_user_id_is_rejected() {
        assert!(parse(json!({ "user_id": { "id": 1 } })).is_err());
    }
}
