//! Application state wiring the chat service to the store and the assistant
//! to its LLM provider.
//!
//! The pool is opened once at startup and handed to handlers through
//! `AppState`; nothing reaches the database through global state.

use std::sync::Arc;

use anyhow::Context;
use clarus_core::chat::assistant::AssistantService;
use clarus_core::chat::service::ChatService;
use clarus_core::llm::provider::LlmProvider;
use clarus_infra::config::{default_database_url, resolve_data_dir, resolve_llm_api_key};
use clarus_infra::llm::openai_compat::OpenAiCompatibleProvider;
use clarus_infra::llm::openai_compat::config::from_llm_config;
use clarus_infra::sqlite::chat::SqliteChatRepository;
use clarus_infra::sqlite::pool::DatabasePool;
use clarus_types::config::{AppConfig, LlmConfig};

/// Chat service pinned to the SQLite repository.
pub type ConcreteChatService = ChatService<SqliteChatRepository>;

/// Assistant pinned to the OpenAI-compatible provider.
pub type ConcreteAssistant = AssistantService<OpenAiCompatibleProvider>;

/// Shared application state used by both CLI commands and REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub assistant: Arc<ConcreteAssistant>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Connect to the configured store and wire the chat service.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db_url = match &config.database.url {
            Some(url) => url.clone(),
            None => {
                let data_dir = resolve_data_dir();
                tokio::fs::create_dir_all(&data_dir)
                    .await
                    .with_context(|| format!("creating data directory {}", data_dir.display()))?;
                default_database_url(&data_dir)
            }
        };

        let db_pool = DatabasePool::new(&db_url, config.database.max_connections)
            .await
            .with_context(|| format!("opening database {db_url}"))?;

        tracing::info!(
            url = %db_url,
            max_connections = config.database.max_connections,
            "Database connected"
        );

        let assistant = build_assistant(&config.llm);
        Ok(Self::from_pool(db_pool).with_assistant(assistant))
    }

    /// Wire the chat service on an already-open pool, with an offline assistant.
    pub fn from_pool(db_pool: DatabasePool) -> Self {
        let chat_repo = SqliteChatRepository::new(db_pool.clone());
        Self {
            chat_service: Arc::new(ChatService::new(chat_repo)),
            assistant: Arc::new(AssistantService::offline()),
            db_pool,
        }
    }

    pub fn with_assistant(mut self, assistant: ConcreteAssistant) -> Self {
        self.assistant = Arc::new(assistant);
        self
    }
}

/// Online assistant when an API key is in the environment, offline otherwise.
fn build_assistant(llm: &LlmConfig) -> ConcreteAssistant {
    match resolve_llm_api_key(|key| std::env::var(key).ok()) {
        Some(api_key) => {
            let provider = OpenAiCompatibleProvider::new(from_llm_config(llm, api_key));
            tracing::info!(
                provider = provider.name(),
                model = %llm.model,
                "LLM provider configured"
            );
            AssistantService::new(provider, Some(llm.temperature))
        }
        None => {
            tracing::warn!("No LLM API key set, chat replies use local rules only");
            AssistantService::offline()
        }
    }
}
