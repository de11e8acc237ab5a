//! Session list handler.
//!
//! Endpoint:
//! - GET /sessions - Every session, newest first

use axum::Json;
use axum::extract::State;

use clarus_types::chat::ChatSession;

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /sessions - List all sessions. Not filtered by user.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChatSession>>, AppError> {
    let sessions = state.chat_service.list_sessions().await?;
    Ok(Json(sessions))
}
