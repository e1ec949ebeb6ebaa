//! Exact k-NN by brute-force scan.
//!
//! Computes the distance from the query to every stored vector with the SIMD
//! kernels, then partial-sorts the top k. O(N·D) per query; for datasets
//! under ~10K vectors this is often faster than any graph index, and it is
//! the ground truth the approximate indexes are measured against.

use std::cmp::Ordering;

use crate::arena::VectorArena;
use crate::distance::DistanceMetric;
use crate::error::{IndexError, Result};

/// Brute-force exact nearest neighbor index.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    pub(crate) arena: VectorArena,
    metric: DistanceMetric,
}

impl FlatIndex {
    /// Create an empty index for `dim`-dimensional vectors using squared L2.
    pub fn new(dim: usize) -> Result<Self> {
        Self::with_metric(dim, DistanceMetric::L2Squared)
    }

    /// Create an empty index with an explicit distance metric.
    pub fn with_metric(dim: usize, metric: DistanceMetric) -> Result<Self> {
        if dim == 0 {
            return Err(IndexError::InvalidParameter(
                "dimension must be >= 1".to_string(),
            ));
        }
        Ok(Self {
            arena: VectorArena::new(dim),
            metric,
        })
    }

    /// Create an empty index with room for `capacity` vectors pre-reserved.
    pub fn with_capacity(dim: usize, capacity: usize) -> Result<Self> {
        if dim == 0 {
            return Err(IndexError::InvalidParameter(
                "dimension must be >= 1".to_string(),
            ));
        }
        Ok(Self {
            arena: VectorArena::with_capacity(dim, capacity),
            metric: DistanceMetric::L2Squared,
        })
    }

    /// Add a vector, returning its assigned ID.
    pub fn add(&mut self, vector: &[f32]) -> Result<u32> {
        self.arena.append(vector)
    }

    /// Add a batch of vectors. IDs are contiguous, continuing from `len()`
    /// before the call.
    ///
    /// Every vector is validated before any is stored: a failing batch
    /// leaves the index unchanged.
    pub fn add_batch(&mut self, vectors: &[Vec<f32>]) -> Result<()> {
        for v in vectors {
            if v.len() != self.dim() {
                return Err(IndexError::DimensionMismatch {
                    expected: self.dim(),
                    got: v.len(),
                });
            }
        }
        self.arena.reserve(vectors.len());
        for v in vectors {
            self.arena.append(v)?;
        }
        Ok(())
    }

    /// Exact k nearest neighbors, ascending by distance.
    ///
    /// Returns at most `min(k, len())` `(id, distance)` pairs. An empty index
    /// or `k == 0` yields an empty list. Ties are broken by ascending ID, so
    /// results are deterministic for a fixed insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(u32, f32)>> {
        if query.len() != self.dim() {
            return Err(IndexError::DimensionMismatch {
                expected: self.dim(),
                got: query.len(),
            });
        }
        if self.arena.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let k = k.min(self.arena.len());
        let mut distances: Vec<(u32, f32)> = (0..self.arena.len())
            .map(|i| (i as u32, self.metric.distance(query, self.arena.row(i))))
            .collect();

        // Partial sort: O(n) partition to the top k, then sort just those
        if k < distances.len() {
            distances.select_nth_unstable_by(k - 1, cmp_by_distance_then_id);
            distances.truncate(k);
        }
        distances.sort_unstable_by(cmp_by_distance_then_id);
        Ok(distances)
    }

    /// Number of stored vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True if no vectors are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Vector dimensionality.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.arena.dim()
    }

    /// Distance metric in use.
    #[must_use]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Drop all vectors, keeping the configuration.
    pub fn clear(&mut self) {
        self.arena.clear();
    }
}

#[inline]
fn cmp_by_distance_then_id(a: &(u32, f32), b: &(u32, f32)) -> Ordering {
    a.1.total_cmp(&b.1).then(a.0.cmp(&b.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_basis_vector() {
        let mut index = FlatIndex::new(3).unwrap();
        index.add(&[1.0, 0.0, 0.0]).unwrap();
        index.add(&[0.0, 1.0, 0.0]).unwrap();
        index.add(&[0.0, 0.0, 1.0]).unwrap();

        let results = index.search(&[0.9, 0.1, 0.0], 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, 0);
        assert!((results[0].1 - 0.02).abs() < 1e-6);
        assert_eq!(results[1].0, 1);
        assert!((results[1].1 - 1.62).abs() < 1e-6);
    }

    #[test]
    fn empty_index_returns_empty() {
        let index = FlatIndex::new(4).unwrap();
        assert!(index.search(&[0.0; 4], 5).unwrap().is_empty());
    }

    #[test]
    fn k_zero_returns_empty() {
        let mut index = FlatIndex::new(2).unwrap();
        index.add(&[1.0, 2.0]).unwrap();
        assert!(index.search(&[1.0, 2.0], 0).unwrap().is_empty());
    }

    #[test]
    fn k_clamped_to_len() {
        let mut index = FlatIndex::new(2).unwrap();
        index.add(&[0.0, 0.0]).unwrap();
        index.add(&[1.0, 1.0]).unwrap();
        let results = index.search(&[0.0, 0.0], 10).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn ties_broken_by_ascending_id() {
        let mut index = FlatIndex::new(2).unwrap();
        // Two identical vectors: equal distance, lower ID must come first
        index.add(&[1.0, 1.0]).unwrap();
        index.add(&[1.0, 1.0]).unwrap();
        index.add(&[5.0, 5.0]).unwrap();

        let results = index.search(&[1.0, 1.0], 3).unwrap();
        assert_eq!(results[0].0, 0);
        assert_eq!(results[1].0, 1);
        assert_eq!(results[2].0, 2);
    }

    #[test]
    fn results_ascending_by_distance() {
        let mut index = FlatIndex::new(1).unwrap();
        for x in [5.0f32, 1.0, 3.0, 2.0, 4.0] {
            index.add(&[x]).unwrap();
        }
        let results = index.search(&[0.0], 5).unwrap();
        for pair in results.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
        assert_eq!(results[0].0, 1); // x = 1.0 is closest to 0
    }

    #[test]
    fn batch_rejects_all_or_nothing() {
        let mut index = FlatIndex::new(3).unwrap();
        index.add(&[0.0; 3]).unwrap();

        let mut batch: Vec<Vec<f32>> = (0..10).map(|i| vec![i as f32; 3]).collect();
        batch[7] = vec![1.0, 2.0]; // wrong dimension

        let err = index.add_batch(&batch).unwrap_err();
        assert!(matches!(err, IndexError::DimensionMismatch { .. }));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn batch_ids_contiguous() {
        let mut index = FlatIndex::new(2).unwrap();
        index.add(&[0.0, 0.0]).unwrap();
        let batch: Vec<Vec<f32>> = (0..5).map(|i| vec![i as f32, 0.0]).collect();
        index.add_batch(&batch).unwrap();
        assert_eq!(index.len(), 6);

        // The batch vector [0, 0] duplicates ID 0's data; exact search finds both first
        let results = index.search(&[0.0, 0.0], 6).unwrap();
        let ids: Vec<u32> = results.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids[0], 0);
        assert_eq!(ids[1], 1);
    }

    #[test]
    fn query_dimension_mismatch_rejected() {
        let mut index = FlatIndex::new(3).unwrap();
        index.add(&[0.0; 3]).unwrap();
        assert!(index.search(&[0.0; 4], 1).is_err());
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(FlatIndex::new(0).is_err());
    }

    #[test]
    fn clear_then_reuse() {
        let mut index = FlatIndex::new(2).unwrap();
        index.add(&[1.0, 2.0]).unwrap();
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.add(&[3.0, 4.0]).unwrap(), 0);
    }

    #[test]
    fn cosine_metric_orders_by_angle() {
        let mut index = FlatIndex::with_metric(2, DistanceMetric::Cosine).unwrap();
        index.add(&[1.0, 0.0]).unwrap(); // aligned with query
        index.add(&[0.0, 1.0]).unwrap(); // orthogonal
        index.add(&[10.0, 0.1]).unwrap(); // near-aligned, large magnitude

        let results = index.search(&[1.0, 0.0], 3).unwrap();
        assert_eq!(results[0].0, 0);
        assert_eq!(results[1].0, 2);
        assert_eq!(results[2].0, 1);
    }
}
