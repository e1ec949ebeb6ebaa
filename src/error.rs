//! Error types for proxim.

use thiserror::Error;

/// Errors that can occur during indexing/search operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Input vector length differs from the index dimensionality.
    #[error("dimension mismatch: index has {expected} dimensions, input has {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for proxim operations.
pub type Result<T> = std::result::Result<T, IndexError>;
