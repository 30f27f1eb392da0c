//! Provider configuration types
//!
//! Configuration for the OpenRouter chat-completions endpoint used for answer
//! synthesis and task extraction.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

fn default_secret() -> SecretString {
    SecretString::from(String::new())
}

/// OpenRouter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    /// API key
    #[serde(skip_serializing, default = "default_secret")]
    pub api_key: SecretString,
    /// Default model
    #[serde(default = "default_openrouter_model")]
    pub default_model: String,
    /// Base URL
    #[serde(default = "default_openrouter_url")]
    pub base_url: String,
    /// Site URL for rankings
    pub site_url: Option<String>,
    /// Site name for rankings
    pub site_name: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        OpenRouterConfig {
            api_key: default_secret(),
            default_model: default_openrouter_model(),
            base_url: default_openrouter_url(),
            site_url: None,
            site_name: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_openrouter_model() -> String {
    "google/gemini-2.0-flash-001".to_string()
}

fn default_openrouter_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_retries() -> u32 {
    3
}
