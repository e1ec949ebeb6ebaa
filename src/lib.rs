//! proxim: in-memory nearest neighbor search for dense f32 embeddings.
//!
//! Two indexes over a fixed-dimensionality vector space:
//!
//! - [`FlatIndex`]: exact k-NN by SIMD brute-force scan with partial sort
//! - [`HnswIndex`]: approximate k-NN via an incrementally built
//!   Hierarchical Navigable Small World graph
//!
//! Both share the same [`simd`] distance kernels (squared L2, cosine) with
//! NEON, AVX2, and scalar paths, and the same flat row-major
//! [`arena`](crate::arena) storage. The [`AnnIndex`] trait unifies them.
//!
//! # Which Index Should I Use?
//!
//! | Situation | Recommendation |
//! |-----------|----------------|
//! | < 10K vectors, or exact results required | [`FlatIndex`] |
//! | Large datasets, tolerate approximate results | [`HnswIndex`] |
//!
//! Brute force is O(N·D) per query but has no build cost and no recall
//! loss; HNSW pays an `ef_construction`-sized beam search per insert for
//! logarithmic-ish queries afterwards.
//!
//! # Usage
//!
//! ```rust
//! use proxim::{FlatIndex, HnswIndex};
//!
//! # fn main() -> proxim::Result<()> {
//! let mut exact = FlatIndex::new(3)?;
//! exact.add_batch(&[
//!     vec![1.0, 0.0, 0.0],
//!     vec![0.0, 1.0, 0.0],
//!     vec![0.0, 0.0, 1.0],
//! ])?;
//! let nearest = exact.search(&[0.9, 0.1, 0.0], 2)?;
//! assert_eq!(nearest[0].0, 0);
//!
//! let mut approx = HnswIndex::new(3)?;
//! approx.add(&[1.0, 0.0, 0.0])?;
//! let nearest = approx.search(&[0.9, 0.1, 0.0], 1)?;
//! assert_eq!(nearest[0].0, 0);
//! # Ok(())
//! # }
//! ```
//!
//! # Determinism
//!
//! The HNSW layer assignment draws from an index-private RNG with a fixed
//! (overridable) seed. A fixed configuration, seed, and insertion sequence
//! produces the same graph on every run on the same platform; cross-platform
//! bit-equality is not promised because SIMD reductions associate
//! floating-point sums differently. [`simd::backend`] reports the active
//! kernel path (`"ARM_NEON"`, `"AVX2"`, or `"SCALAR"`).
//!
//! # Concurrency
//!
//! Indexes are single-writer, synchronous, and own all of their state. Wrap
//! an index in your own lock if you need shared access.

pub mod ann;
pub mod arena;
pub mod distance;
pub mod error;
pub mod flat;
pub mod hnsw;
pub mod simd;

pub use ann::{AnnIndex, AnnStats};
pub use distance::DistanceMetric;
pub use error::{IndexError, Result};
pub use flat::FlatIndex;
pub use hnsw::{HnswIndex, HnswParams};
