//! # meetmind
//!
//! Meeting memory for a conversational assistant, built with Rust.
//!
//! ## Features
//!
//! - **Task Extraction:** Action items pulled from transcripts through OpenRouter
//! - **Local Embeddings:** fastembed models, loaded once per process
//! - **Semantic Memory:** Flat L2 index persisted next to the stored notes
//! - **Grounded Answers:** Lexical reduction plus a one-sentence model answer

pub mod agent;
pub mod config;
pub mod core;
pub mod error;
pub mod memory;
pub mod tasks;

pub use config::Config;
pub use error::{Error, Result};
pub use memory::{ChatMemory, MemoryStore};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = env!("CARGO_PKG_NAME");
