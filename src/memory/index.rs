//! Exact nearest-neighbor index over L2 distance
//!
//! Vectors are stored flat, one after another, and addressed by insertion
//! position. Search is a linear scan, which is plenty for the few thousand
//! entries a meeting memory holds.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use super::atomic::write_atomic;

/// A search hit: stored position and its Euclidean distance to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    pub distance: f32,
}

/// Flat (brute-force) L2 vector index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index for vectors of `dimension` values
    pub fn new(dimension: usize) -> Self {
        FlatIndex {
            dimension,
            vectors: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.vectors.len() / self.dimension
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a vector; returns the position it was stored at.
    ///
    /// A vector of the wrong length is rejected and the index is left
    /// untouched.
    pub fn insert(&mut self, vector: &[f32]) -> Result<usize> {
        self.check_dimension(vector)?;
        let position = self.len();
        self.vectors.extend_from_slice(vector);
        Ok(position)
    }

    /// Up to `k` nearest stored vectors, closest first (ties by position)
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        self.check_dimension(query)?;
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<Neighbor> = self
            .vectors
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(position, stored)| Neighbor {
                position,
                distance: l2_distance(stored, query),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.position.cmp(&b.position))
        });
        hits.truncate(k);
        Ok(hits)
    }

    /// Keep only the first `len` vectors
    pub fn truncate(&mut self, len: usize) {
        self.vectors.truncate(len * self.dimension);
    }

    /// Drop every vector, keeping the dimension
    pub fn reset(&mut self) {
        self.vectors.clear();
    }

    /// Persist as MessagePack, replacing the file atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(self)?;
        write_atomic(path, &bytes)?;
        debug!(path = %path.display(), vectors = self.len(), "Saved vector index");
        Ok(())
    }

    /// Read an index written by `save`
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let index: FlatIndex = rmp_serde::from_slice(&bytes)?;

        if index.dimension == 0 || index.vectors.len() % index.dimension != 0 {
            return Err(Error::Index(format!(
                "{} holds {} values, not a multiple of dimension {}",
                path.display(),
                index.vectors.len(),
                index.dimension
            )));
        }
        Ok(index)
    }

    /// Load the index at `path`, or start empty.
    ///
    /// Never fails: a missing, unreadable or wrong-dimension file yields a
    /// fresh index of `dimension`.
    pub fn load_or_new(path: &Path, dimension: usize) -> Self {
        if !path.exists() {
            return FlatIndex::new(dimension);
        }

        match FlatIndex::load(path) {
            Ok(index) if index.dimension == dimension => index,
            Ok(index) => {
                warn!(
                    path = %path.display(),
                    found = index.dimension,
                    expected = dimension,
                    "Vector index has the wrong dimension, starting empty"
                );
                FlatIndex::new(dimension)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load vector index, starting empty");
                FlatIndex::new(dimension)
            }
        }
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(Error::Index(format!(
                "expected {} dimensions, got {}",
                self.dimension,
                vector.len()
            )));
        }
        Ok(())
    }
}

fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn index_with(points: &[[f32; 2]]) -> FlatIndex {
        let mut index = FlatIndex::new(2);
        for p in points {
            index.insert(p).unwrap();
        }
        index
    }

    #[test]
    fn test_insert_assigns_sequential_positions() {
        let mut index = FlatIndex::new(2);
        assert_eq!(index.insert(&[0.0, 0.0]).unwrap(), 0);
        assert_eq!(index.insert(&[1.0, 1.0]).unwrap(), 1);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_insert_rejects_wrong_dimension() {
        let mut index = index_with(&[[0.0, 0.0]]);
        assert!(matches!(index.insert(&[1.0, 2.0, 3.0]), Err(Error::Index(_))));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_search_orders_by_distance() {
        let index = index_with(&[[10.0, 0.0], [1.0, 0.0], [3.0, 4.0]]);
        let hits = index.search(&[0.0, 0.0], 3).unwrap();

        let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![1, 2, 0]);
        assert!((hits[1].distance - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_search_returns_all_when_fewer_than_k() {
        let index = index_with(&[[1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(index.search(&[0.0, 0.0], 5).unwrap().len(), 2);
    }

    #[test]
    fn test_search_empty_index() {
        let index = FlatIndex::new(2);
        assert!(index.search(&[0.0, 0.0], 3).unwrap().is_empty());
    }

    #[test]
    fn test_search_ties_break_by_position() {
        let index = index_with(&[[1.0, 0.0], [0.0, 1.0], [1.0, 0.0]]);
        let hits = index.search(&[0.0, 0.0], 3).unwrap();
        let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vector_store.idx");
        let index = index_with(&[[1.0, 2.0], [3.0, 4.0]]);

        index.save(&path).unwrap();
        assert_eq!(FlatIndex::load(&path).unwrap(), index);
    }

    #[test]
    fn test_load_or_new_recovers_from_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vector_store.idx");
        std::fs::write(&path, b"definitely not msgpack").unwrap();

        let index = FlatIndex::load_or_new(&path, 384);
        assert!(index.is_empty());
        assert_eq!(index.dimension(), 384);
    }

    #[test]
    fn test_load_or_new_rejects_other_dimension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vector_store.idx");
        index_with(&[[1.0, 2.0]]).save(&path).unwrap();

        let index = FlatIndex::load_or_new(&path, 384);
        assert!(index.is_empty());
        assert_eq!(index.dimension(), 384);
    }

    #[test]
    fn test_truncate_and_reset() {
        let mut index = index_with(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]);
        index.truncate(1);
        assert_eq!(index.len(), 1);
        index.reset();
        assert!(index.is_empty());
        assert_eq!(index.dimension(), 2);
    }
}
