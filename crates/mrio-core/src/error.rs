//! Error types for block-matrix operations
//!
//! One enum covers every structural failure the algebra can produce. All of
//! these are programmer or data errors: none is retryable, none is recovered
//! internally, and each carries the offending index/chunk/shape so the caller
//! can diagnose the call site directly.

use scirs2_linalg::LinalgError;
use thiserror::Error;

/// Error type for block-matrix operations
#[derive(Error, Debug)]
pub enum BlockError {
    /// Signed 1-based block index (or region exclusion) outside `[1, blocks]`
    #[error("block index {index} out of range: magnitude must be between 1 and {blocks}")]
    InvalidIndex { index: isize, blocks: usize },

    /// Unsupported sector-aggregation scheme
    #[error("unsupported sector aggregation {agg}: must be 5, 15, or 35")]
    InvalidAggregation { agg: usize },

    /// Chunked reduction with a chunk size that does not tile the axis
    #[error("axis of length {len} cannot be divided into equal-sized chunks of {chunk}")]
    ChunkMismatch { len: usize, chunk: usize },

    /// Operand shapes incompatible for the requested operation
    #[error("{operation}: incompatible shapes {left:?} and {right:?}")]
    ShapeMismatch {
        operation: &'static str,
        left: Vec<usize>,
        right: Vec<usize>,
    },

    /// Operation requires a different rank (vector vs. matrix)
    #[error("{operation}: requires a rank-{expected} operand, got rank {actual}")]
    RankMismatch {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Matrix inversion failed (singular or numerically rank-deficient matrix)
    #[error("matrix inversion failed: {0}")]
    Singular(#[from] LinalgError),
}

/// Result type alias for block-matrix operations
pub type BlockResult<T> = Result<T, BlockError>;
