//! LLM Provider trait - Abstract interface for LLM backends
//!
//! The answer synthesizer and the task extractor talk to a language model
//! only through `LlmProvider`, which keeps them testable with mock providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::agent::{GenerationOptions, Message};
use crate::error::Result;

/// Metadata about a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderMeta {
    /// Unique provider identifier
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Base URL for the API
    pub base_url: String,
}

/// Response from an LLM provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Model used for generation
    pub model: String,
    /// Generated content
    pub content: String,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
    /// Token usage statistics
    pub usage: Option<UsageStats>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageStats {
    /// Number of prompt tokens
    pub prompt_tokens: u32,
    /// Number of completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

/// Abstract interface for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get provider metadata
    fn meta(&self) -> &ProviderMeta;

    /// Get the provider ID
    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Get the default model for this provider
    fn default_model(&self) -> &str;

    /// Generate a response (non-streaming)
    async fn generate(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<LlmResponse>;
}
