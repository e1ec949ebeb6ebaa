//! Hierarchical Navigable Small World (HNSW) approximate nearest neighbor
//! search.
//!
//! # Algorithm
//!
//! HNSW maintains a multi-layer proximity graph:
//! - **Upper layers**: sparse, long-range connections for fast navigation
//! - **Layer 0**: dense, local connections holding every vector
//! - **Search**: greedy descent from the entry point to layer 0, then a
//!   bounded beam search
//!
//! Insertion is incremental: each vector is assigned a random level
//! (geometric distribution, normalized by `1/ln(2M)`), linked to its
//! `ef_construction`-beam nearest neighbors at every layer it participates
//! in, and overflowing neighbor lists are trimmed back to the nearest M.
//! The graph for a fixed configuration, seed, and insertion sequence is
//! identical across runs on the same platform.
//!
//! # Usage
//!
//! ```rust
//! use proxim::hnsw::HnswIndex;
//!
//! # fn main() -> proxim::Result<()> {
//! let mut index = HnswIndex::new(4)?;
//!
//! index.add(&[1.0, 0.0, 0.0, 0.0])?;
//! index.add(&[0.0, 1.0, 0.0, 0.0])?;
//!
//! let results = index.search(&[0.9, 0.1, 0.0, 0.0], 1)?;
//! assert_eq!(results[0].0, 0);
//! # Ok(())
//! # }
//! ```
//!
//! # References
//!
//! - Malkov & Yashunin (2016): "Efficient and robust approximate nearest
//!   neighbor search using Hierarchical Navigable Small World graphs"

pub(crate) mod construction;
mod graph;
pub(crate) mod search;

pub use graph::{HnswIndex, HnswParams};
