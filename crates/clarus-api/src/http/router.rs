//! Axum router configuration with middleware.
//!
//! Middleware: CORS (any origin, method and header) and request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/messages", post(handlers::messages::record_messages))
        .route(
            "/history/{session_id}",
            get(handlers::history::get_history),
        )
        .route("/sessions", get(handlers::session::list_sessions))
        .route("/health", get(handlers::health::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use clarus_infra::sqlite::pool::DatabasePool;
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::http::error::INTERNAL_ERROR_MESSAGE;

    async fn test_state() -> (AppState, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("api.db").display());
        let pool = DatabasePool::new(&url, 4).await.unwrap();
        (AppState::from_pool(pool), dir)
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    fn post_messages(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/messages")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_chat(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_record_then_read_history() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        let (status, body) = send(
            &app,
            post_messages(json!({
                "session_id": "s1",
                "user_message": "hi",
                "assistant_reply": "hello"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "status": "ok" }));

        let (status, body) = send(&app, get("/history/s1")).await;
        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["role"], "user");
        assert_eq!(entries[0]["content"], "hi");
        assert!(entries[0]["created_at"].is_string());
        assert_eq!(entries[1]["role"], "assistant");
        assert_eq!(entries[1]["content"], "hello");
    }

    #[tokio::test]
    async fn test_repeated_posts_append_to_one_session() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        for i in 0..3 {
            let (status, _) = send(
                &app,
                post_messages(json!({
                    "session_id": "s1",
                    "user_id": "u1",
                    "user_message": format!("question {i}"),
                    "assistant_reply": format!("answer {i}")
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, sessions) = send(&app, get("/sessions")).await;
        let sessions = sessions.as_array().unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0]["title"], "question 0");
        assert_eq!(sessions[0]["user_id"], "u1");

        let (_, history) = send(&app, get("/history/s1")).await;
        let contents: Vec<&str> = history
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["content"].as_str().unwrap())
            .collect();
        assert_eq!(
            contents,
            vec!["question 0", "answer 0", "question 1", "answer 1", "question 2", "answer 2"]
        );
    }

    #[tokio::test]
    async fn test_missing_fields_return_400_and_store_nothing() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        for body in [
            json!({ "user_message": "hi", "assistant_reply": "hello" }),
            json!({ "session_id": "s1", "assistant_reply": "hello" }),
            json!({ "session_id": "s1", "user_message": "hi" }),
            json!({ "session_id": "", "user_message": "hi", "assistant_reply": "hello" }),
        ] {
            let (status, resp) = send(&app, post_messages(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(resp["error"].as_str().unwrap().contains("missing required field"));
        }

        let (_, sessions) = send(&app, get("/sessions")).await;
        assert_eq!(sessions, json!([]));
        let (_, history) = send(&app, get("/history/s1")).await;
        assert_eq!(history, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400_json() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        let req = Request::builder()
            .method("POST")
            .uri("/messages")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let req = Request::builder()
            .method("POST")
            .uri("/messages")
            .body(Body::from("session_id=s1"))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_numeric_user_id_is_accepted() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        let (status, _) = send(
            &app,
            post_messages(json!({
                "session_id": "s1",
                "user_id": 7,
                "user_message": "hi",
                "assistant_reply": "hello"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, sessions) = send(&app, get("/sessions")).await;
        assert_eq!(sessions[0]["user_id"], "7");
    }

    #[tokio::test]
    async fn test_numeric_session_id_is_accepted() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        let (status, _) = send(
            &app,
            post_messages(json!({
                "session_id": 123,
                "user_message": "hi",
                "assistant_reply": "hello"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, history) = send(&app, get("/history/123")).await;
        assert_eq!(history.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_chat_replies_and_saves_exchange() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        let (status, body) = send(
            &app,
            post_chat(json!({ "message": "Bonjour", "session_id": "c1", "user_id": "u1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let reply = body["reply"].as_str().unwrap();
        assert!(reply.starts_with("Salut !"));

        let (_, history) = send(&app, get("/history/c1")).await;
        let entries = history.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["content"], "Bonjour");
        assert_eq!(entries[1]["role"], "assistant");
        assert_eq!(entries[1]["content"], reply);

        let (_, sessions) = send(&app, get("/sessions")).await;
        assert_eq!(sessions[0]["user_id"], "u1");
        assert_eq!(sessions[0]["title"], "Bonjour");
    }

    #[tokio::test]
    async fn test_chat_defaults_session_and_accepts_numeric_ids() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        let (status, _) = send(&app, post_chat(json!({ "message": "merci" }))).await;
        assert_eq!(status, StatusCode::OK);
        let (_, history) = send(&app, get("/history/default")).await;
        assert_eq!(history.as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app,
            post_chat(json!({ "message": "passeport", "session_id": 77, "mode": "exam" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["reply"].as_str().unwrap().contains("passeport"));
        let (_, history) = send(&app, get("/history/77")).await;
        assert_eq!(history.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_chat_empty_message_asks_for_details_and_saves_nothing() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        let (status, body) = send(&app, post_chat(json!({ "message": "   ", "session_id": "c1" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], clarus_core::chat::fallback::CLARIFY_REPLY);

        let (_, sessions) = send(&app, get("/sessions")).await;
        assert_eq!(sessions, json!([]));
    }

    #[tokio::test]
    async fn test_chat_still_replies_when_save_fails() {
        let (state, _dir) = test_state().await;
        sqlx::query(
            r#"CREATE TRIGGER fail_assistant_insert BEFORE INSERT ON chat_messages
               WHEN NEW.role = 'assistant'
               BEGIN SELECT RAISE(ABORT, 'simulated store fault'); END"#,
        )
        .execute(&state.db_pool.writer)
        .await
        .unwrap();
        let app = build_router(state);

        let (status, body) = send(&app, post_chat(json!({ "message": "merci", "session_id": "c1" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["reply"].as_str().unwrap().starts_with("Avec plaisir"));

        let (_, history) = send(&app, get("/history/c1")).await;
        assert_eq!(history, json!([]));
    }

    #[tokio::test]
    async fn test_chat_malformed_body_returns_400() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        let req = Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_session_history_is_empty_array() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        let (status, body) = send(&app, get("/history/does-not-exist")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_sessions_newest_first_with_summary_fields() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        for sid in ["first", "second"] {
            send(
                &app,
                post_messages(json!({
                    "session_id": sid,
                    "user_message": "hi",
                    "assistant_reply": "hello"
                })),
            )
            .await;
        }

        let (status, body) = send(&app, get("/sessions")).await;
        assert_eq!(status, StatusCode::OK);
        let sessions = body.as_array().unwrap();
        assert_eq!(sessions[0]["session_id"], "second");
        assert_eq!(sessions[1]["session_id"], "first");

        let mut keys: Vec<&str> = sessions[0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["created_at", "id", "session_id", "title", "user_id"]);
        assert!(sessions[0]["user_id"].is_null());
    }

    #[tokio::test]
    async fn test_store_fault_returns_generic_500_and_rolls_back() {
        let (state, _dir) = test_state().await;
        sqlx::query(
            r#"CREATE TRIGGER fail_assistant_insert BEFORE INSERT ON chat_messages
               WHEN NEW.role = 'assistant'
               BEGIN SELECT RAISE(ABORT, 'simulated store fault'); END"#,
        )
        .execute(&state.db_pool.writer)
        .await
        .unwrap();
        let app = build_router(state);

        let (status, body) = send(
            &app,
            post_messages(json!({
                "session_id": "s1",
                "user_message": "hi",
                "assistant_reply": "hello"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": INTERNAL_ERROR_MESSAGE }));

        let (_, sessions) = send(&app, get("/sessions")).await;
        assert_eq!(sessions, json!([]));
        let (_, history) = send(&app, get("/history/s1")).await;
        assert_eq!(history, json!([]));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let (state, _dir) = test_state().await;
        let app = build_router(state);

        let req = Request::builder()
            .method("OPTIONS")
            .uri("/messages")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_health_reports_ok_then_unavailable() {
        let (state, _dir) = test_state().await;
        let pool = state.db_pool.clone();
        let app = build_router(state);

        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "ok");

        pool.close().await;
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
    }
}
