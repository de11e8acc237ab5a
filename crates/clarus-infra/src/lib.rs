//! Infrastructure layer for Clarus.
//!
//! Contains the SQLite implementation of the `ChatRepository` trait defined
//! in `clarus-core`, the connection pool, the OpenAI-compatible LLM provider,
//! and the configuration file loader.

pub mod config;
pub mod llm;
pub mod sqlite;
