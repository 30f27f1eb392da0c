//! Configuration I/O - Loading configuration
//!
//! Layered precedence: defaults < config file < `MEETMIND__*` environment
//! variables < conventional provider variables (`OPENROUTER_API_KEY`, ...).

use std::path::Path;

use super::types::Config;
use crate::error::Result;

/// Load configuration from the default config path
pub fn load_config() -> Result<Config> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    load_config_from_path(&super::paths::config_path())
}

/// Load configuration from a specific path.
///
/// A missing file is not an error; the format follows the file extension
/// (TOML, JSON or JSON5).
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let settings = ::config::Config::builder()
        .add_source(::config::File::from(path).required(false))
        .add_source(
            ::config::Environment::with_prefix("MEETMIND")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: Config = settings.try_deserialize()?;
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Apply conventional environment variable overrides to an existing config.
pub fn apply_env_overrides(config: &mut Config) {
    use secrecy::SecretString;

    // OpenRouter overrides
    if let Ok(api_key) = std::env::var("OPENROUTER_API_KEY") {
        config.openrouter.api_key = SecretString::from(api_key);
    }
    if let Ok(model) = std::env::var("OPENROUTER_MODEL") {
        config.openrouter.default_model = model;
    }
    if let Ok(url) = std::env::var("OPENROUTER_BASE_URL") {
        config.openrouter.base_url = url;
    }

    // Logging overrides
    if let Ok(format) = std::env::var("LOG_FORMAT") {
        config.log.format = format;
    }
}
