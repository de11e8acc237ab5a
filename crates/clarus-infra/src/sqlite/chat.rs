//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `clarus-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reads on the reader
//! pool and the recording transaction on the writer.

use chrono::{DateTime, SecondsFormat, Utc};
use clarus_core::chat::repository::ChatRepository;
use clarus_types::chat::{ChatSession, HistoryEntry, MessageRole, NewExchange, RecordOutcome};
use clarus_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatSessionRow {
    id: i64,
    session_id: String,
    user_id: Option<String>,
    title: String,
    created_at: String,
}

impl ChatSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        Ok(ChatSession {
            id: self.id,
            session_id: self.session_id,
            user_id: self.user_id,
            title: self.title,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

struct HistoryRow {
    role: String,
    content: String,
    created_at: String,
}

impl HistoryRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_entry(self) -> Result<HistoryEntry, RepositoryError> {
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(HistoryEntry {
            role,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC 3339 so that text ordering in SQL is chronological.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn record_exchange(
        &self,
        exchange: &NewExchange,
    ) -> Result<RecordOutcome, RepositoryError> {
        // Dropping `tx` on any early return rolls back and releases the connection.
        let mut tx = self.pool.writer.begin().await.map_err(map_sqlx_error)?;

        // Stamped while holding the single writer, so timestamps follow commit order.
        let created_at = format_datetime(&Utc::now());

        let session = sqlx::query(
            r#"INSERT INTO chat_sessions (session_id, user_id, title, created_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT(session_id) DO NOTHING"#,
        )
        .bind(&exchange.session_id)
        .bind(&exchange.user_id)
        .bind(exchange.session_title())
        .bind(&created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        // User row first: ids break ties between equal timestamps.
        for (role, content) in [
            (MessageRole::User, &exchange.user_message),
            (MessageRole::Assistant, &exchange.assistant_reply),
        ] {
            sqlx::query(
                r#"INSERT INTO chat_messages (session_id, user_id, role, content, created_at)
                   VALUES (?, ?, ?, ?, ?)"#,
            )
            .bind(&exchange.session_id)
            .bind(&exchange.user_id)
            .bind(role.to_string())
            .bind(content)
            .bind(&created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Transaction(e.to_string()))?;

        Ok(RecordOutcome {
            session_created: session.rows_affected() == 1,
        })
    }

    async fn get_history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT role, content, created_at FROM chat_messages
               WHERE session_id = ?
               ORDER BY created_at ASC, id ASC"#,
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in &rows {
            let history_row = HistoryRow::from_row(row).map_err(map_sqlx_error)?;
            entries.push(history_row.into_entry()?);
        }

        Ok(entries)
    }

    async fn list_sessions(&self) -> Result<Vec<ChatSession>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT id, session_id, user_id, title, created_at FROM chat_sessions
               ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx_error)?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row = ChatSessionRow::from_row(row).map_err(map_sqlx_error)?;
            sessions.push(session_row.into_session()?);
        }

        Ok(sessions)
    }
}
