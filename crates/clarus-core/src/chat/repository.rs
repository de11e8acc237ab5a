//! ChatRepository trait definition.

use clarus_types::chat::{ChatSession, HistoryEntry, NewExchange, RecordOutcome};
use clarus_types::error::RepositoryError;

/// Repository trait for chat session and message persistence.
///
/// Implementations live in clarus-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Store one exchange as a single atomic unit.
    ///
    /// Creates the session row if `exchange.session_id` is new (insert-if-absent,
    /// never overwriting an existing row), then appends the user message and
    /// the assistant message in that order. Either all of it persists or none.
    fn record_exchange(
        &self,
        exchange: &NewExchange,
    ) -> impl std::future::Future<Output = Result<RecordOutcome, RepositoryError>> + Send;

    /// Messages of a session in insertion order. Unknown sessions yield an
    /// empty list.
    fn get_history(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<HistoryEntry>, RepositoryError>> + Send;

    /// All sessions, newest first.
    fn list_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;
}
