//! Memory module - embedding, indexing, and retrieval of past meetings
//!
//! Notes are normalized and embedded locally (fastembed), stored in a flat
//! L2 index next to their texts, and answered from by a lexical reducer
//! followed by one language-model call.

pub(crate) mod atomic;
pub mod cache;
pub mod embedding;
pub mod index;
pub mod normalizer;
pub mod reducer;
pub mod store;
pub mod synthesizer;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::EmbeddingCache;
pub use embedding::{EmbeddingService, ModelChoice, SharedEmbedder};
pub use index::{FlatIndex, Neighbor};
pub use normalizer::normalize;
pub use reducer::{Reduction, RetrievalReducer, NOTHING_SPECIFIC};
pub use store::{ChatMemory, MemoryStore, NO_MEMORY_YET, SEARCH_UNAVAILABLE};
pub use synthesizer::{clean_answer, AnswerSynthesizer};
