//! Chat session and message types for Clarus.
//!
//! A session is a conversation thread keyed by a caller-supplied
//! `session_id`. Each recorded exchange appends one user message and one
//! assistant message to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Maximum number of characters of the first user message kept as the title.
pub const SESSION_TITLE_MAX_CHARS: usize = 80;

/// Author of a stored message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'assistant'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A conversation thread.
///
/// `id` is the store's surrogate key; `session_id` is the external key the
/// caller chose. `title` and `user_id` are fixed by the first exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: i64,
    pub session_id: String,
    pub user_id: Option<String>,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// One message as returned by the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A user message and the assistant's reply, to be stored together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExchange {
    pub session_id: String,
    pub user_id: Option<String>,
    pub user_message: String,
    pub assistant_reply: String,
}

impl NewExchange {
    /// Title for a session opened by this exchange.
    pub fn session_title(&self) -> String {
        session_title(&self.user_message)
    }
}

/// What a successful recording did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordOutcome {
    /// True when this exchange opened the session.
    pub session_created: bool,
}

/// First [`SESSION_TITLE_MAX_CHARS`] characters of `user_message`.
///
/// Counts `char`s, so a multi-byte code point is never split.
pub fn session_title(user_message: &str) -> String {
    user_message.chars().take(SESSION_TITLE_MAX_CHARS).collect()
}
