//! Assistant: answers a question with the LLM, falling back to local rules.
//!
//! Every call yields a reply. Provider errors and empty completions are
//! logged and answered by [`fallback::local_reply`] instead.

use clarus_types::chat::{HistoryEntry, MessageRole};
use clarus_types::llm::{ChatMode, CompletionRequest, Message};
use tracing::{debug, warn};

use crate::chat::fallback::{self, CLARIFY_REPLY};
use crate::chat::prompt::{SYSTEM_PROMPT, build_prompt};
use crate::llm::provider::LlmProvider;

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Llm,
    Fallback,
}

/// Text to send back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

impl Reply {
    fn local(message: &str) -> Self {
        Self {
            text: fallback::local_reply(message),
            source: ReplySource::Fallback,
        }
    }
}

/// Generic over `LlmProvider` so tests can substitute a scripted provider.
///
/// Without a provider (no API key configured) every reply is local.
pub struct AssistantService<P: LlmProvider> {
    provider: Option<P>,
    temperature: Option<f64>,
}

impl<P: LlmProvider> AssistantService<P> {
    pub fn new(provider: P, temperature: Option<f64>) -> Self {
        Self {
            provider: Some(provider),
            temperature,
        }
    }

    /// An assistant that only uses the local rules.
    pub fn offline() -> Self {
        Self {
            provider: None,
            temperature: None,
        }
    }

    pub fn is_online(&self) -> bool {
        self.provider.is_some()
    }

    /// Answer `message` in the context of a session's `history`.
    pub async fn reply(&self, message: &str, mode: ChatMode, history: &[HistoryEntry]) -> Reply {
        let question = message.trim();
        if question.is_empty() {
            return Reply {
                text: CLARIFY_REPLY.to_string(),
                source: ReplySource::Fallback,
            };
        }

        let Some(provider) = &self.provider else {
            debug!("No LLM provider configured, using local reply");
            return Reply::local(message);
        };

        let request = CompletionRequest {
            model: String::new(),
            system: Some(SYSTEM_PROMPT.to_string()),
            messages: vec![Message {
                role: MessageRole::User,
                content: build_prompt(question, mode, history),
            }],
            temperature: self.temperature,
        };

        match provider.complete(&request).await {
            Ok(response) => {
                let text = response.content.trim();
                if text.is_empty() {
                    warn!(provider = provider.name(), "LLM returned an empty reply, using local reply");
                    Reply::local(message)
                } else {
                    debug!(provider = provider.name(), model = %response.model, "LLM reply received");
                    Reply {
                        text: text.to_string(),
                        source: ReplySource::Llm,
                    }
                }
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "LLM call failed, using local reply");
                Reply::local(message)
            }
        }
    }
}
