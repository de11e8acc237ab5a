//! Chat service: records exchanges, reads history, lists sessions.
//!
//! ChatService validates input and delegates storage to a `ChatRepository`.
//! It holds no state of its own, so one instance is shared by every request.

use clarus_types::chat::{ChatSession, HistoryEntry, NewExchange, RecordOutcome};
use clarus_types::error::ChatError;
use tracing::{debug, info, warn};

use crate::chat::repository::ChatRepository;

/// Orchestrates chat history persistence.
///
/// Generic over `ChatRepository` to maintain clean architecture
/// (clarus-core never depends on clarus-infra).
pub struct ChatService<C: ChatRepository> {
    chat_repo: C,
}

impl<C: ChatRepository> ChatService<C> {
    /// Create a new chat service with the given repository.
    pub fn new(chat_repo: C) -> Self {
        Self { chat_repo }
    }

    /// Access the chat repository.
    pub fn chat_repo(&self) -> &C {
        &self.chat_repo
    }

    /// Record a user message and the assistant's reply.
    ///
    /// Rejects the exchange with `ChatError::Validation` before touching the
    /// store when a required field is empty. A blank `user_id` is stored as
    /// absent.
    pub async fn record_exchange(
        &self,
        mut exchange: NewExchange,
    ) -> Result<RecordOutcome, ChatError> {
        if let Err(e) = validate_exchange(&exchange) {
            warn!(session_id = %exchange.session_id, error = %e, "Rejected invalid exchange");
            return Err(e);
        }

        exchange.user_id = exchange
            .user_id
            .take()
            .filter(|user_id| !user_id.trim().is_empty());

        let outcome = self.chat_repo.record_exchange(&exchange).await?;

        if outcome.session_created {
            info!(session_id = %exchange.session_id, "Chat session created");
        }
        debug!(session_id = %exchange.session_id, "Exchange recorded");

        Ok(outcome)
    }

    /// Messages of a session, oldest first.
    pub async fn history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, ChatError> {
        let entries = self.chat_repo.get_history(session_id).await?;
        debug!(session_id = %session_id, count = entries.len(), "History loaded");
        Ok(entries)
    }

    /// Every session, newest first.
    ///
    /// Not scoped to a user: callers see all sessions.
    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>, ChatError> {
        Ok(self.chat_repo.list_sessions().await?)
    }
}

/// Check that the required fields of an exchange are present.
///
/// Whitespace-only values count as missing. The error names every missing
/// field.
pub fn validate_exchange(exchange: &NewExchange) -> Result<(), ChatError> {
    let missing: Vec<&str> = [
        ("session_id", exchange.session_id.as_str()),
        ("user_message", exchange.user_message.as_str()),
        ("assistant_reply", exchange.assistant_reply.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ChatError::Validation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )))
    }
}
