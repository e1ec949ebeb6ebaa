//! Unified trait over the exact and approximate indexes.
//!
//! Lets embedders start on [`FlatIndex`] (exact, no tuning) and swap in
//! [`HnswIndex`] once the dataset outgrows brute force, without touching
//! call sites.

use crate::error::Result;
use crate::flat::FlatIndex;
use crate::hnsw::HnswIndex;

/// Common operations of every nearest-neighbor index.
pub trait AnnIndex {
    /// Add a vector, returning its assigned ID.
    fn add(&mut self, vector: &[f32]) -> Result<u32>;

    /// Add a batch of vectors; all-or-nothing on validation.
    fn add_batch(&mut self, vectors: &[Vec<f32>]) -> Result<()>;

    /// k nearest neighbors as `(id, distance)`, ascending by distance.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<(u32, f32)>>;

    /// Number of indexed vectors.
    fn len(&self) -> usize;

    /// True if no vectors are indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vector dimensionality.
    fn dim(&self) -> usize;

    /// Drop all vectors, keeping the configuration.
    fn clear(&mut self);

    /// Approximate index memory footprint in bytes.
    fn size_bytes(&self) -> usize;

    /// Index statistics.
    fn stats(&self) -> AnnStats;
}

/// Statistics about an index.
#[derive(Debug, Clone)]
pub struct AnnStats {
    pub num_vectors: usize,
    pub dimension: usize,
    pub size_bytes: usize,
    pub algorithm: String,
}

impl AnnIndex for FlatIndex {
    fn add(&mut self, vector: &[f32]) -> Result<u32> {
        self.add(vector)
    }

    fn add_batch(&mut self, vectors: &[Vec<f32>]) -> Result<()> {
        self.add_batch(vectors)
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<(u32, f32)>> {
        self.search(query, k)
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn dim(&self) -> usize {
        self.dim()
    }

    fn clear(&mut self) {
        self.clear();
    }

    fn size_bytes(&self) -> usize {
        self.arena.size_bytes()
    }

    fn stats(&self) -> AnnStats {
        AnnStats {
            num_vectors: self.len(),
            dimension: self.dim(),
            size_bytes: AnnIndex::size_bytes(self),
            algorithm: "Flat".to_string(),
        }
    }
}

impl AnnIndex for HnswIndex {
    fn add(&mut self, vector: &[f32]) -> Result<u32> {
        self.add(vector)
    }

    fn add_batch(&mut self, vectors: &[Vec<f32>]) -> Result<()> {
        self.add_batch(vectors)
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<(u32, f32)>> {
        self.search(query, k)
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn dim(&self) -> usize {
        self.dim()
    }

    fn clear(&mut self) {
        self.clear();
    }

    fn size_bytes(&self) -> usize {
        // Vectors plus graph adjacency
        self.arena.size_bytes()
            + self
                .nodes
                .iter()
                .flat_map(|n| n.neighbors.iter())
                .map(|l| l.len() * std::mem::size_of::<u32>())
                .sum::<usize>()
    }

    fn stats(&self) -> AnnStats {
        AnnStats {
            num_vectors: self.len(),
            dimension: self.dim(),
            size_bytes: AnnIndex::size_bytes(self),
            algorithm: "HNSW".to_string(),
        }
    }
}
