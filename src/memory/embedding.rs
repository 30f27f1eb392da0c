//! Local embedding generation via fastembed
//!
//! The model is loaded once per process and shared by every store; the
//! first embedding request pays the load (and, on a fresh machine, the
//! download). All supported models produce 384-dimensional vectors.

use crate::config::EmbeddingConfig;
use crate::core::Embedder;
use crate::error::{Error, Result};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

/// Process-wide embedding model
static SHARED: OnceCell<EmbeddingService> = OnceCell::const_new();

/// Embedding models this crate knows how to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChoice {
    /// sentence-transformers/all-MiniLM-L6-v2
    AllMiniLmL6V2,
    /// intfloat/multilingual-e5-small
    MultilingualE5Small,
    /// BAAI/bge-small-en-v1.5
    BgeSmallEnV15,
}

impl ModelChoice {
    /// Output dimensions of the model
    pub fn dimensions(&self) -> usize {
        384
    }

    fn fastembed_model(&self) -> EmbeddingModel {
        match self {
            ModelChoice::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
            ModelChoice::MultilingualE5Small => EmbeddingModel::MultilingualE5Small,
            ModelChoice::BgeSmallEnV15 => EmbeddingModel::BGESmallENV15,
        }
    }
}

impl FromStr for ModelChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        let name = name.rsplit('/').next().unwrap_or(&name);
        match name {
            "all-minilm-l6-v2" => Ok(ModelChoice::AllMiniLmL6V2),
            "multilingual-e5-small" => Ok(ModelChoice::MultilingualE5Small),
            "bge-small-en-v1.5" => Ok(ModelChoice::BgeSmallEnV15),
            _ => Err(Error::Config(format!("Unsupported embedding model: {}", s))),
        }
    }
}

impl std::fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelChoice::AllMiniLmL6V2 => write!(f, "all-minilm-l6-v2"),
            ModelChoice::MultilingualE5Small => write!(f, "multilingual-e5-small"),
            ModelChoice::BgeSmallEnV15 => write!(f, "bge-small-en-v1.5"),
        }
    }
}

/// Local embedding service wrapping fastembed
#[derive(Clone)]
pub struct EmbeddingService {
    model: Arc<TextEmbedding>,
    choice: ModelChoice,
}

impl EmbeddingService {
    /// Load the configured model. Blocking; downloads the model if needed.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let choice: ModelChoice = config.model.parse()?;

        info!(model = %choice, cache_dir = %config.cache_dir.display(), "Loading embedding model");

        let model = TextEmbedding::try_new(
            InitOptions::new(choice.fastembed_model())
                .with_cache_dir(config.cache_dir.clone())
                .with_show_download_progress(config.show_download_progress),
        )
        .map_err(|e| Error::Embedding(format!("Failed to init embedding model: {}", e)))?;

        Ok(EmbeddingService {
            model: Arc::new(model),
            choice,
        })
    }

    /// The process-wide instance, loaded on first call.
    ///
    /// Later calls return the already-loaded model whatever `config` says.
    pub async fn shared(config: &EmbeddingConfig) -> Result<Self> {
        SHARED
            .get_or_try_init(|| async {
                let config = config.clone();
                tokio::task::spawn_blocking(move || EmbeddingService::new(&config))
                    .await
                    .map_err(|e| Error::Internal(format!("Embedding load join error: {}", e)))?
            })
            .await
            .cloned()
    }

    /// Generate an embedding for a single text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let model = self.model.clone();
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let embeddings = model
                .embed(vec![text], None)
                .map_err(|e| Error::Embedding(format!("Embedding error: {}", e)))?;
            embeddings
                .into_iter()
                .next()
                .ok_or_else(|| Error::Embedding("No embedding returned".into()))
        })
        .await
        .map_err(|e| Error::Internal(format!("Embedding task join error: {}", e)))?
    }

    /// Get the embedding dimensions
    pub fn dimensions(&self) -> usize {
        self.choice.dimensions()
    }
}

#[async_trait]
impl Embedder for EmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        EmbeddingService::embed(self, text).await
    }

    fn dimensions(&self) -> usize {
        EmbeddingService::dimensions(self)
    }
}

/// Embedder handle that loads the shared model on its first request.
///
/// Lets a host open a store (for `status` or `clear`) without paying for
/// the model load.
#[derive(Clone)]
pub struct SharedEmbedder {
    config: EmbeddingConfig,
    choice: ModelChoice,
}

impl SharedEmbedder {
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        let choice = config.model.parse()?;
        Ok(SharedEmbedder { config, choice })
    }
}

#[async_trait]
impl Embedder for SharedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        EmbeddingService::shared(&self.config)
            .await?
            .embed(text)
            .await
    }

    fn dimensions(&self) -> usize {
        self.choice.dimensions()
    }
}
