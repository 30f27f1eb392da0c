//! Storage configuration types
//!
//! Where the memory files live, how retrieval is sized, and which local
//! embedding model produces the vectors.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Memory store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Directory holding the index and text files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Vector index file name
    #[serde(default = "default_index_file")]
    pub index_file: String,
    /// Text sequence file name
    #[serde(default = "default_texts_file")]
    pub texts_file: String,
    /// Embedding dimensions
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// Nearest neighbors fetched per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Lines kept in the reduced context handed to the synthesizer
    #[serde(default = "default_max_context_lines")]
    pub max_context_lines: usize,
    /// Maximum cached embeddings
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
    /// Embedding cache time-to-live
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        MemoryConfig {
            data_dir: default_data_dir(),
            index_file: default_index_file(),
            texts_file: default_texts_file(),
            dimension: default_dimension(),
            top_k: default_top_k(),
            max_context_lines: default_max_context_lines(),
            cache_capacity: default_cache_capacity(),
            cache_ttl: default_cache_ttl(),
        }
    }
}

impl MemoryConfig {
    /// Config rooted at `dir`, everything else default
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        MemoryConfig {
            data_dir: dir.into(),
            ..Default::default()
        }
    }

    /// Full path of the vector index file
    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join(&self.index_file)
    }

    /// Full path of the text sequence file
    pub fn texts_path(&self) -> PathBuf {
        self.data_dir.join(&self.texts_file)
    }
}

fn default_data_dir() -> PathBuf {
    crate::config::data_dir()
}

fn default_index_file() -> String {
    "vector_store.idx".to_string()
}

fn default_texts_file() -> String {
    "memory_texts.json".to_string()
}

fn default_dimension() -> usize {
    384
}

fn default_top_k() -> usize {
    3
}

fn default_max_context_lines() -> usize {
    3
}

fn default_cache_capacity() -> u64 {
    1000
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(30 * 60)
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding model
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Where downloaded model files are kept
    #[serde(default = "default_model_cache_dir")]
    pub cache_dir: PathBuf,
    /// Show a progress bar while the model downloads
    #[serde(default = "default_true")]
    pub show_download_progress: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        EmbeddingConfig {
            model: default_embedding_model(),
            cache_dir: default_model_cache_dir(),
            show_download_progress: true,
        }
    }
}

fn default_embedding_model() -> String {
    "all-minilm-l6-v2".to_string()
}

fn default_model_cache_dir() -> PathBuf {
    crate::config::models_dir()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_config_default() {
        let config = MemoryConfig::default();
        assert_eq!(config.dimension, 384);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.max_context_lines, 3);
    }

    #[test]
    fn test_memory_paths_are_siblings() {
        let config = MemoryConfig::in_dir("/tmp/meetmind-test");
        assert_eq!(
            config.index_path().parent(),
            config.texts_path().parent()
        );
        assert!(config.index_path().ends_with("vector_store.idx"));
        assert!(config.texts_path().ends_with("memory_texts.json"));
    }
}
