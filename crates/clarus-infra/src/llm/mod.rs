//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `clarus-core`, used for the xAI Grok endpoint by default.
//!
//! [`LlmProvider`]: clarus_core::llm::provider::LlmProvider

pub mod openai_compat;
