//! Business logic and repository trait definitions for Clarus.
//!
//! This crate defines the ports (`ChatRepository`, `LlmProvider`) that the
//! infrastructure layer implements, the `ChatService` that the HTTP and CLI
//! layers call, and the assistant that turns a question into a reply.
//! It depends only on `clarus-types` -- never on `clarus-infra` or any
//! database/IO crate.

pub mod chat;
pub mod llm;
