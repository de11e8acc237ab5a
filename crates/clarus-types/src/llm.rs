//! LLM request/response types and the assistant's conversation modes.

use serde::{Deserialize, Serialize};

use crate::chat::MessageRole;

/// Tone the assistant adopts for a conversation.
///
/// Parsed leniently from the request: `"prof"` and `"exam"` select a persona,
/// anything else gets neutral instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Patient tutor, step-by-step explanations.
    #[default]
    Prof,
    /// Examiner asking questions and correcting answers.
    Exam,
    Neutral,
}

impl ChatMode {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "prof" => ChatMode::Prof,
            "exam" => ChatMode::Exam,
            _ => ChatMode::Neutral,
        }
    }
}

/// One turn in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Provider-agnostic completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Empty means the provider's configured model.
    pub model: String,
    pub system: Option<String>,
    pub messages: Vec<Message>,
    pub temperature: Option<f64>,
}

/// Text returned by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

/// Errors from LLM providers.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),
}
