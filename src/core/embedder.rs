//! Embedder trait - Abstract interface for text embedding backends

use async_trait::async_trait;

use crate::error::Result;

/// Maps a text to a fixed-length dense vector.
///
/// Implementations must be deterministic for a given model version and
/// always return `dimensions()` values.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Length of every vector this embedder produces
    fn dimensions(&self) -> usize;
}
