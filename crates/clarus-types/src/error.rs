use thiserror::Error;

/// Errors from repository operations (used by trait definitions in clarus-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("transaction error: {0}")]
    Transaction(String),
}

/// Errors surfaced by the chat service.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The caller sent an incomplete exchange.
    #[error("{0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Store(#[from] RepositoryError),
}
