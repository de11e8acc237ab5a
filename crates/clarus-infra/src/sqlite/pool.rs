//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time. `DatabasePool` keeps a bounded
//! reader pool for concurrent history and session reads and a
//! single-connection writer pool through which every recording transaction
//! is serialized. Callers that find a pool exhausted wait in sqlx's acquire
//! queue until a connection is returned.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Split read/write pool for SQLite with WAL mode.
///
/// - `reader`: Multi-connection pool for concurrent SELECT queries.
/// - `writer`: Single-connection pool for serialized transactions.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open the pools for `database_url` with up to `max_readers` reader
    /// connections.
    ///
    /// Applies the embedded schema on the writer before the reader pool is
    /// opened. Both pools use WAL journal mode and a 5-second busy timeout.
    pub async fn new(database_url: &str, max_readers: u32) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(max_readers.max(1))
            .connect_with(read_opts)
            .await?;

        tracing::debug!(max_readers, "Database pool ready");

        Ok(Self { reader, writer })
    }

    /// Round-trip a trivial query to prove the store is reachable.
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.reader).await?;
        Ok(())
    }

    /// Close both pools, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.writer.close().await;
        self.reader.close().await;
    }
}
