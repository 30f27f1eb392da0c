//! Configuration module
//!
//! - types/mod.rs: Root `Config` and logging settings
//! - types/provider.rs: Language-model provider configuration
//! - types/storage.rs: Memory store and embedding configuration
//! - io.rs: Layered loading (defaults, file, environment)
//! - validation.rs: Configuration validation
//! - paths.rs: Configuration and data file paths

mod io;
mod paths;
mod types;
mod validation;

pub use types::{Config, LogConfig};
pub use types::provider::OpenRouterConfig;
pub use types::storage::{EmbeddingConfig, MemoryConfig};

pub use io::{apply_env_overrides, load_config, load_config_from_path};
pub use paths::{config_dir, config_path, data_dir, models_dir};
pub use validation::{validate_config, ConfigValidationResult, ValidationIssue};
