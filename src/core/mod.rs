//! Core module - Traits at the seams of the memory pipeline
//!
//! - Provider trait for language-model backends
//! - Embedder trait for text embedding backends
//!
//! The memory store and synthesizer depend only on these traits, so tests
//! can swap in counting mocks and hosts can swap in other backends.

pub mod embedder;
pub mod provider;

// Re-export core traits for convenient access
pub use embedder::Embedder;
pub use provider::{LlmProvider, LlmResponse, ProviderMeta, UsageStats};
