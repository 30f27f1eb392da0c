//! Configuration paths
//!
//! Utilities for resolving configuration and data file paths.

use std::path::PathBuf;

/// Get the configuration directory
pub fn config_dir() -> PathBuf {
    // Check for explicit override
    if let Ok(dir) = std::env::var("MEETMIND_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    // Use XDG config directory or fallback
    dirs::config_dir()
        .map(|d| d.join("meetmind"))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".config").join("meetmind"))
                .unwrap_or_else(|| PathBuf::from(".meetmind"))
        })
}

/// Get the main configuration file path
pub fn config_path() -> PathBuf {
    // Check for explicit override
    if let Ok(path) = std::env::var("MEETMIND_CONFIG") {
        return PathBuf::from(path);
    }

    config_dir().join("config.toml")
}

/// Get the data directory (memory files, downloaded models)
pub fn data_dir() -> PathBuf {
    // Check for explicit override
    if let Ok(dir) = std::env::var("MEETMIND_DATA_DIR") {
        return PathBuf::from(dir);
    }

    // Use XDG data directory or fallback
    dirs::data_dir()
        .map(|d| d.join("meetmind"))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".local").join("share").join("meetmind"))
                .unwrap_or_else(|| PathBuf::from(".meetmind"))
        })
}

/// Get the embedding model cache directory
pub fn models_dir() -> PathBuf {
    data_dir().join("models")
}
