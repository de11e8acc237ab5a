//! Liveness endpoint.
//!
//! Endpoint:
//! - GET /health - Service identity plus a store round-trip

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /health - 200 when the store answers, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.db_pool.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "clarus-chat",
                "version": env!("CARGO_PKG_VERSION"),
                "database": "ok",
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "service": "clarus-chat",
                    "version": env!("CARGO_PKG_VERSION"),
                    "database": "unavailable",
                })),
            )
        }
    }
}
