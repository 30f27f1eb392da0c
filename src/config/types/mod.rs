//! Configuration types module

pub mod provider;
pub mod storage;

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Memory store configuration
    #[serde(default)]
    pub memory: storage::MemoryConfig,

    /// Embedding model configuration
    #[serde(default)]
    pub embedding: storage::EmbeddingConfig,

    /// OpenRouter (answer synthesis and task extraction)
    #[serde(default)]
    pub openrouter: provider::OpenRouterConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from defaults, the config file and the environment
    pub fn load() -> crate::error::Result<Self> {
        crate::config::load_config()
    }

    /// Validate, turning the first error into `Error::Config`
    pub fn validate(&self) -> crate::error::Result<()> {
        let result = crate::config::validate_config(self);
        match result.errors.first() {
            Some(issue) => Err(crate::error::Error::Config(format!(
                "{}: {}",
                issue.path, issue.message
            ))),
            None => Ok(()),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (overridden by RUST_LOG)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info,meetmind=debug".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
