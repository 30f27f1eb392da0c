//! Agent module - LLM client and prompt engineering
//!
//! - OpenRouter API client, exposed through `core::LlmProvider`
//! - Chat completion wire types
//! - Prompt templates for answer synthesis and task extraction

mod client;
pub mod prompts;
mod types;

pub use client::OpenRouterClient;
pub use prompts::PromptTemplate;
pub use types::*;
