//! In-process embedding cache
//!
//! Uses moka async cache (Send + Sync, TTL-based eviction) so repeated
//! queries and re-added notes skip the embedding model.

use moka::future::Cache;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Duration;

/// Cache key helper: hash a string to u64
fn hash_key(s: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    s.hash(&mut hasher);
    hasher.finish()
}

/// Embedding cache: hash(text) -> vector
#[derive(Clone)]
pub struct EmbeddingCache {
    embeddings: Cache<u64, Vec<f32>>,
}

impl EmbeddingCache {
    /// Create a cache holding at most `capacity` vectors for `ttl`
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        EmbeddingCache {
            embeddings: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Get a cached embedding
    pub async fn get(&self, text: &str) -> Option<Vec<f32>> {
        self.embeddings.get(&hash_key(text)).await
    }

    /// Store an embedding in cache
    pub async fn put(&self, text: &str, embedding: Vec<f32>) {
        self.embeddings.insert(hash_key(text), embedding).await;
    }
}

impl Default for EmbeddingCache {
    fn default() -> Self {
        Self::new(1000, Duration::from_secs(30 * 60))
    }
}
