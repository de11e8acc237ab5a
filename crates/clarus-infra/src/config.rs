//! Configuration loader for Clarus.
//!
//! Reads `clarus.toml` (or the path given on the command line) into
//! [`AppConfig`], then applies `CLARUS_*` environment overrides. A missing
//! file means defaults; a file that exists but does not parse is an error,
//! so the service never starts against a store other than the one configured.

use std::path::{Path, PathBuf};

use clarus_types::config::AppConfig;
use secrecy::SecretString;
use thiserror::Error;

pub const ENV_DATA_DIR: &str = "CLARUS_DATA_DIR";
pub const ENV_DATABASE_URL: &str = "CLARUS_DATABASE_URL";
pub const ENV_HTTP_HOST: &str = "CLARUS_HTTP_HOST";
pub const ENV_HTTP_PORT: &str = "CLARUS_HTTP_PORT";
pub const ENV_LLM_BASE_URL: &str = "CLARUS_LLM_BASE_URL";
pub const ENV_LLM_MODEL: &str = "CLARUS_LLM_MODEL";
pub const ENV_LLM_API_KEY: &str = "CLARUS_LLM_API_KEY";
/// Key name used by earlier deployments.
pub const ENV_GROK_API_KEY: &str = "GROK_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Load configuration from `path` and the process environment.
pub async fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let mut config = load_config_file(path).await?;
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Parse `path` without looking at the environment.
pub async fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str::<AppConfig>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply `CLARUS_*` overrides using `lookup` to read variables.
pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_DATABASE_URL).filter(|v| !v.is_empty()) {
        config.database.url = Some(url);
    }
    if let Some(host) = lookup(ENV_HTTP_HOST).filter(|v| !v.is_empty()) {
        config.http.host = host;
    }
    if let Some(port) = lookup(ENV_HTTP_PORT).filter(|v| !v.is_empty()) {
        config.http.port = port.parse().map_err(|_| ConfigError::InvalidValue {
            key: ENV_HTTP_PORT,
            value: port,
        })?;
    }
    if let Some(base_url) = lookup(ENV_LLM_BASE_URL).filter(|v| !v.is_empty()) {
        config.llm.base_url = base_url;
    }
    if let Some(model) = lookup(ENV_LLM_MODEL).filter(|v| !v.is_empty()) {
        config.llm.model = model;
    }
    Ok(())
}

/// LLM API key from the environment, never from the config file.
///
/// `CLARUS_LLM_API_KEY` wins over `GROK_API_KEY`. `None` means the assistant
/// runs offline on local rules.
pub fn resolve_llm_api_key<F>(lookup: F) -> Option<SecretString>
where
    F: Fn(&str) -> Option<String>,
{
    [ENV_LLM_API_KEY, ENV_GROK_API_KEY]
        .into_iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .map(SecretString::from)
}

/// Directory holding the default database file.
///
/// `CLARUS_DATA_DIR` if set, otherwise `~/.clarus`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".clarus")
}

/// SQLite URL for `clarus.db` inside `data_dir`.
pub fn default_database_url(data_dir: &Path) -> String {
    format!("sqlite://{}?mode=rwc", data_dir.join("clarus.db").display())
}
