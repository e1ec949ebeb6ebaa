//! HNSW index structure and public API.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::arena::VectorArena;
use crate::distance::DistanceMetric;
use crate::error::{IndexError, Result};
use crate::hnsw::{construction, search};

/// HNSW construction and search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HnswParams {
    /// Target neighbor count per node per layer above 0.
    pub m: usize,

    /// Neighbor cap at layer 0. Defaults to `2 * m`.
    pub m_max0: usize,

    /// Beam width during insertion. Larger = better graph, slower build.
    pub ef_construction: usize,

    /// Beam width on layer 0 during query. Mutable at runtime via
    /// [`HnswIndex::set_ef`]. Larger = better recall, slower query.
    pub ef_search: usize,

    /// Capacity reservation hint for the arena and node storage. Does not
    /// bound insertions.
    pub max_elements: usize,

    /// Seed for the index-private RNG driving level assignment. Fixed by
    /// default so that builds are reproducible.
    pub seed: u64,

    /// Distance metric, chosen once at construction.
    pub metric: DistanceMetric,
}

impl Default for HnswParams {
    fn default() -> Self {
        Self {
            m: 16,
            m_max0: 32,
            ef_construction: 200,
            ef_search: 100,
            max_elements: 1_000_000,
            seed: 42,
            metric: DistanceMetric::L2Squared,
        }
    }
}

/// One graph node: per-layer neighbor lists indexing into the arena.
///
/// A node sampled at level L carries lists for layers `0..=L`. Lists hold
/// arena IDs only; the arena owns all vector data, so the cyclic graph needs
/// no ownership cycles.
#[derive(Debug, Clone)]
pub(crate) struct HnswNode {
    pub(crate) neighbors: Vec<SmallVec<[u32; 16]>>,
}

impl HnswNode {
    pub(crate) fn new(level: usize) -> Self {
        Self {
            neighbors: vec![SmallVec::new(); level + 1],
        }
    }
}

/// Hierarchical Navigable Small World index.
///
/// Approximate k-NN with incremental insertion. All state (vector arena,
/// adjacency, entry point, RNG) is owned exclusively by the index; the API
/// is synchronous and single-writer.
#[derive(Debug, Clone)]
pub struct HnswIndex {
    pub(crate) arena: VectorArena,
    pub(crate) nodes: Vec<HnswNode>,
    pub(crate) entry_point: Option<u32>,
    pub(crate) max_layer: usize,
    pub(crate) params: HnswParams,
    ml: f64,
    rng: StdRng,
}

impl HnswIndex {
    /// Create an empty index for `dim`-dimensional vectors with default
    /// parameters (`M = 16`, `ef_construction = 200`, `ef_search = 100`).
    pub fn new(dim: usize) -> Result<Self> {
        Self::with_params(dim, HnswParams::default())
    }

    /// Create an empty index with explicit parameters.
    pub fn with_params(dim: usize, params: HnswParams) -> Result<Self> {
        if dim == 0 {
            return Err(IndexError::InvalidParameter(
                "dimension must be >= 1".to_string(),
            ));
        }
        if params.m == 0 {
            return Err(IndexError::InvalidParameter("m must be >= 1".to_string()));
        }
        if params.ef_construction == 0 || params.ef_search == 0 {
            return Err(IndexError::InvalidParameter(
                "ef_construction and ef_search must be >= 1".to_string(),
            ));
        }

        let ml = 1.0 / (2.0 * params.m as f64).ln();
        let rng = StdRng::seed_from_u64(params.seed);
        Ok(Self {
            arena: VectorArena::with_capacity(dim, params.max_elements),
            nodes: Vec::with_capacity(params.max_elements),
            entry_point: None,
            max_layer: 0,
            ml,
            rng,
            params,
        })
    }

    /// Add a vector, returning its assigned ID.
    ///
    /// IDs are dense and monotonically increasing in insertion order.
    pub fn add(&mut self, vector: &[f32]) -> Result<u32> {
        construction::insert(self, vector)
    }

    /// Add a batch of vectors. IDs are contiguous, continuing from `len()`
    /// before the call.
    ///
    /// Every vector is validated before any is inserted: a failing batch
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
        self.nodes.reserve(vectors.len());
        for v in vectors {
            construction::insert(self, v)?;
        }
        Ok(())
    }

    /// Approximate k nearest neighbors, ascending by distance.
    ///
    /// Descends greedily from the entry point to layer 1, then runs a
    /// layer-0 beam search with width `max(ef_search, k)`. Returns at most
    /// `min(k, len())` `(id, distance)` pairs; an empty index or `k == 0`
    /// yields an empty list.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(u32, f32)>> {
        if query.len() != self.dim() {
            return Err(IndexError::DimensionMismatch {
                expected: self.dim(),
                got: query.len(),
            });
        }
        let Some(entry) = self.entry_point else {
            return Ok(Vec::new());
        };
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut curr = entry;
        for layer in (1..=self.max_layer).rev() {
            let found = search::search_layer(
                query,
                curr,
                1,
                layer,
                &self.nodes,
                &self.arena,
                self.params.metric,
            );
            if let Some(&(id, _)) = found.first() {
                curr = id;
            }
        }

        let ef = self.params.ef_search.max(k);
        let mut results = search::search_layer(
            query,
            curr,
            ef,
            0,
            &self.nodes,
            &self.arena,
            self.params.metric,
        );
        results.truncate(k.min(self.len()));
        Ok(results)
    }

    /// Update the query-time beam width. Must be >= 1.
    pub fn set_ef(&mut self, ef: usize) -> Result<()> {
        if ef == 0 {
            return Err(IndexError::InvalidParameter(
                "ef must be >= 1".to_string(),
            ));
        }
        self.params.ef_search = ef;
        Ok(())
    }

    /// Number of indexed vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True if no vectors are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Vector dimensionality.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.arena.dim()
    }

    /// Parameters the index was built with (`ef_search` reflects `set_ef`).
    #[must_use]
    pub fn params(&self) -> &HnswParams {
        &self.params
    }

    /// Highest layer currently present in the graph.
    #[must_use]
    pub fn max_layer(&self) -> usize {
        self.max_layer
    }

    /// Read-only view of a node's neighbor list at a layer.
    ///
    /// `None` if the node does not exist or does not reach `layer`. Useful
    /// for graph introspection and determinism checks.
    #[must_use]
    pub fn neighbors(&self, id: u32, layer: usize) -> Option<&[u32]> {
        self.nodes
            .get(id as usize)?
            .neighbors
            .get(layer)
            .map(|n| n.as_slice())
    }

    /// Drop all vectors and graph state, keeping the configuration.
    ///
    /// The RNG is re-seeded with the construction seed, so repeating the
    /// same insertion sequence reproduces the same graph.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.nodes.clear();
        self.entry_point = None;
        self.max_layer = 0;
        self.rng = StdRng::seed_from_u64(self.params.seed);
    }

    /// Sample the level for a new node: `floor(-ln(U) * ml)`, `U ~ (0,1)`.
    pub(crate) fn random_level(&mut self) -> usize {
        let u = loop {
            let u: f64 = self.rng.gen();
            if u > 0.0 {
                break u;
            }
        };
        (-u.ln() * self.ml) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> HnswParams {
        HnswParams {
            max_elements: 64,
            ..Default::default()
        }
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(HnswIndex::new(0).is_err());
    }

    #[test]
    fn zero_ef_rejected() {
        let mut index = HnswIndex::with_params(4, small_params()).unwrap();
        assert!(index.set_ef(0).is_err());
        assert!(index.set_ef(1).is_ok());
    }

    #[test]
    fn level_sampling_is_nonnegative_and_bounded() {
        let mut index = HnswIndex::with_params(4, small_params()).unwrap();
        for _ in 0..10_000 {
            let level = index.random_level();
            // With ml = 1/ln(32), P(level >= 12) < 1e-18
            assert!(level < 12);
        }
    }

    #[test]
    fn level_sampling_is_seed_deterministic() {
        let mut a = HnswIndex::with_params(4, small_params()).unwrap();
        let mut b = HnswIndex::with_params(4, small_params()).unwrap();
        let la: Vec<usize> = (0..100).map(|_| a.random_level()).collect();
        let lb: Vec<usize> = (0..100).map(|_| b.random_level()).collect();
        assert_eq!(la, lb);
    }

    #[test]
    fn first_insert_sets_entry_point() {
        let mut index = HnswIndex::with_params(2, small_params()).unwrap();
        let id = index.add(&[1.0, 2.0]).unwrap();
        assert_eq!(id, 0);
        assert_eq!(index.entry_point, Some(0));
        assert_eq!(index.len(), 1);
        // The single node has a list for every layer up to its level
        assert!(index.neighbors(0, 0).is_some());
    }

    #[test]
    fn neighbors_out_of_range_is_none() {
        let mut index = HnswIndex::with_params(2, small_params()).unwrap();
        index.add(&[1.0, 2.0]).unwrap();
        assert!(index.neighbors(5, 0).is_none());
        assert!(index.neighbors(0, 99).is_none());
    }
}
