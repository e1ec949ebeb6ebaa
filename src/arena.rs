//! Flat row-major storage for fixed-dimension f32 vectors.
//!
//! All vector data lives in one contiguous buffer; vector `i` occupies
//! `[i * dim, (i + 1) * dim)`. Graph structures hold indices into the arena,
//! never the data itself.

use crate::error::{IndexError, Result};

/// Append-only arena of N×D vectors in one contiguous buffer.
///
/// IDs are dense and assigned in insertion order starting at 0; the IDs the
/// arena assigns are exactly the IDs the indexes return from search.
#[derive(Debug, Clone, Default)]
pub struct VectorArena {
    data: Vec<f32>,
    dim: usize,
}

impl VectorArena {
    /// Create an empty arena for `dim`-dimensional vectors.
    pub fn new(dim: usize) -> Self {
        Self {
            data: Vec::new(),
            dim,
        }
    }

    /// Create an arena with room for `capacity` vectors pre-reserved.
    ///
    /// The capacity is a reservation hint only; appends beyond it grow the
    /// buffer as usual.
    pub fn with_capacity(dim: usize, capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity * dim),
            dim,
        }
    }

    /// Copy a vector to the tail of the arena and return its assigned ID.
    pub fn append(&mut self, vector: &[f32]) -> Result<u32> {
        if vector.len() != self.dim {
            return Err(IndexError::DimensionMismatch {
                expected: self.dim,
                got: vector.len(),
            });
        }
        let id = self.len() as u32;
        self.data.extend_from_slice(vector);
        Ok(id)
    }

    /// Borrow the `id`-th vector.
    ///
    /// The view must not be retained across mutating calls (appends may
    /// reallocate the buffer).
    ///
    /// # Panics
    ///
    /// Panics if `id >= len()`.
    #[inline]
    #[must_use]
    pub fn row(&self, id: usize) -> &[f32] {
        let start = id * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Number of stored vectors.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        if self.dim == 0 {
            return 0;
        }
        self.data.len() / self.dim
    }

    /// True if no vectors are stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Vector dimensionality.
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Reserve room for `additional` more vectors.
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional * self.dim);
    }

    /// Drop all vectors, keeping the dimensionality.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Total buffer size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f32>()
    }
}
