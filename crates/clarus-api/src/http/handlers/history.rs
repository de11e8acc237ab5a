//! Session history handler.
//!
//! Endpoint:
//! - GET /history/{session_id} - Messages of a session, oldest first

use axum::Json;
use axum::extract::{Path, State};

use clarus_types::chat::HistoryEntry;

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /history/{session_id} - An unknown session yields `[]`, not 404.
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let entries = state.chat_service.history(&session_id).await?;
    Ok(Json(entries))
}
