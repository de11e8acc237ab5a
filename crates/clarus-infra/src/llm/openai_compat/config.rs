//! Configuration for OpenAI-compatible providers.

use std::time::Duration;

use clarus_types::config::LlmConfig;
use secrecy::SecretString;

/// Configuration for an OpenAI-compatible chat-completions endpoint.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "xai", "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.x.ai/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model used when a request leaves it empty.
    pub model: String,
    /// Upper bound on one completion call.
    pub timeout: Duration,
}

/// Provider name derived from a base URL's host.
pub fn provider_name_for(base_url: &str) -> &'static str {
    if base_url.contains("api.x.ai") {
        "xai"
    } else if base_url.contains("api.openai.com") {
        "openai"
    } else {
        "openai_compatible"
    }
}

/// Build the provider configuration from the `[llm]` section and a key.
pub fn from_llm_config(config: &LlmConfig, api_key: SecretString) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: provider_name_for(&config.base_url).into(),
        base_url: config.base_url.clone(),
        api_key,
        model: config.model.clone(),
        timeout: Duration::from_secs(config.timeout_secs),
    }
}
