//! Persistent meeting memory
//!
//! Pairs a flat vector index with the ordered list of texts it was built
//! from. Position `i` in the index is the embedding of `texts[i]`; every
//! operation here keeps the two sequences the same length.

use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::MemoryConfig;
use crate::core::Embedder;
use crate::error::Result;

use super::atomic::{remove_if_exists, write_atomic};
use super::cache::EmbeddingCache;
use super::index::{FlatIndex, Neighbor};
use super::normalizer::normalize;
use super::reducer::{Reduction, RetrievalReducer, NOTHING_SPECIFIC};
use super::synthesizer::AnswerSynthesizer;

/// Returned by `retrieve` before anything has been stored
pub const NO_MEMORY_YET: &str = "I don’t have any prior memory yet.";

/// Returned by `retrieve` when the query cannot be embedded or searched
pub const SEARCH_UNAVAILABLE: &str = "I couldn’t search my memory right now.";

/// Append-only semantic memory of past meetings
pub struct MemoryStore {
    config: MemoryConfig,
    embedder: Arc<dyn Embedder>,
    cache: EmbeddingCache,
    index: FlatIndex,
    texts: Vec<String>,
    reducer: RetrievalReducer,
    synthesizer: AnswerSynthesizer,
}

/// Name used by chat hosts
pub type ChatMemory = MemoryStore;

impl MemoryStore {
    /// Open the memory persisted under `config.data_dir`.
    ///
    /// Never fails. Missing or unreadable files give an empty memory, and
    /// files of different lengths are cut back to their common prefix.
    pub fn open(
        config: MemoryConfig,
        embedder: Arc<dyn Embedder>,
        synthesizer: AnswerSynthesizer,
    ) -> Self {
        if embedder.dimensions() != config.dimension {
            warn!(
                embedder = embedder.dimensions(),
                configured = config.dimension,
                "Embedder dimension differs from memory.dimension, adds will fail"
            );
        }

        let mut index = FlatIndex::load_or_new(&config.index_path(), config.dimension);
        let mut texts = load_texts(&config.texts_path());

        if index.len() != texts.len() {
            let keep = index.len().min(texts.len());
            warn!(
                vectors = index.len(),
                texts = texts.len(),
                keep,
                "Memory files disagree, keeping their common prefix"
            );
            index.truncate(keep);
            texts.truncate(keep);
        }

        info!(
            entries = texts.len(),
            data_dir = %config.data_dir.display(),
            "Opened meeting memory"
        );

        MemoryStore {
            cache: EmbeddingCache::new(config.cache_capacity, config.cache_ttl),
            reducer: RetrievalReducer::new(config.max_context_lines),
            config,
            embedder,
            index,
            texts,
            synthesizer,
        }
    }

    /// Normalize, embed and append `text`, then persist both files.
    ///
    /// Blank input is ignored. An embedding failure is returned before
    /// anything changes; a persist failure is only logged.
    pub async fn add(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            debug!("Ignoring blank memory entry");
            return Ok(());
        }

        let normalized = normalize(text);
        let vector = self.embed(&normalized).await?;
        let position = self.index.insert(&vector)?;
        self.texts.push(normalized);

        info!(position, entries = self.texts.len(), "Stored memory entry");

        if let Err(e) = self.persist() {
            warn!(error = %e, "Failed to persist meeting memory, keeping it in memory only");
        }
        Ok(())
    }

    /// Answer `query` from the `top_k` nearest entries. Never fails.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> String {
        if self.texts.is_empty() {
            return NO_MEMORY_YET.to_string();
        }

        let neighbors = match self.search(query, top_k).await {
            Ok(neighbors) => neighbors,
            Err(e) => {
                warn!(error = %e, "Memory search failed");
                return SEARCH_UNAVAILABLE.to_string();
            }
        };

        let entries = self.entries_for(&neighbors);
        debug!(hits = neighbors.len(), entries = entries.len(), "Retrieved memory entries");

        match self.reducer.reduce(&entries, query) {
            Reduction::NothingFound => NOTHING_SPECIFIC.to_string(),
            Reduction::Context(context) => self.synthesizer.answer(&context, query).await,
        }
    }

    /// `retrieve` with the configured `top_k`
    pub async fn recall(&self, query: &str) -> String {
        self.retrieve(query, self.config.top_k).await
    }

    /// Forget everything, on disk and in memory. Safe to repeat.
    pub fn clear(&mut self) -> Result<()> {
        remove_if_exists(&self.config.index_path())?;
        remove_if_exists(&self.config.texts_path())?;
        self.index.reset();
        self.texts.clear();
        info!("Cleared meeting memory");
        Ok(())
    }

    /// Number of stored texts
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Number of stored vectors
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<Neighbor>> {
        let vector = self.embed(query).await?;
        self.index.search(&vector, top_k)
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if let Some(vector) = self.cache.get(text).await {
            debug!("Embedding cache hit");
            return Ok(vector);
        }
        let vector = self.embedder.embed(text).await?;
        self.cache.put(text, vector.clone()).await;
        Ok(vector)
    }

    /// Texts for the hits, first occurrence of each distinct text only
    fn entries_for(&self, neighbors: &[Neighbor]) -> Vec<&str> {
        let mut entries: Vec<&str> = Vec::new();
        for neighbor in neighbors {
            let Some(text) = self.texts.get(neighbor.position) else {
                continue;
            };
            if !entries.contains(&text.as_str()) {
                entries.push(text);
            }
        }
        entries
    }

    /// Index first, then texts: a crash in between leaves the texts file
    /// as the shorter prefix, which `open` recovers from.
    fn persist(&self) -> Result<()> {
        self.index.save(&self.config.index_path())?;
        let json = serde_json::to_vec(&self.texts)?;
        write_atomic(&self.config.texts_path(), &json)?;
        debug!(entries = self.texts.len(), "Persisted meeting memory");
        Ok(())
    }
}

fn load_texts(path: &Path) -> Vec<String> {
    if !path.exists() {
        return Vec::new();
    }

    let loaded = std::fs::read(path)
        .map_err(crate::error::Error::from)
        .and_then(|bytes| serde_json::from_slice::<Vec<String>>(&bytes).map_err(Into::into));

    match loaded {
        Ok(texts) => texts,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load memory texts, starting empty");
            Vec::new()
        }
    }
}
