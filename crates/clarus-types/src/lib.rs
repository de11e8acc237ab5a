//! Shared domain types for Clarus.
//!
//! This crate contains the types used across the chat service: sessions,
//! history entries, the exchange being recorded, LLM requests, configuration,
//! and the error enums shared by the service and storage layers.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
