//! Error types for model construction
//!
//! Everything here is fail-fast: a wrong year, a table whose shape
//! disagrees with the schema, or a singular Leontief system surfaces
//! immediately with enough context to diagnose the offending input.
//! Structural failures from the block algebra pass through unchanged.

use mrio_core::BlockError;
use thiserror::Error;

/// Error type for MRIO/EE model construction
#[derive(Error, Debug)]
pub enum ModelError {
    /// Requested year absent from the source's reported year set
    #[error("year {year} is not available in the source (available: {available:?})")]
    InvalidYear { year: i32, available: Vec<i32> },

    /// Fetched table shape disagrees with the schema derived from it
    #[error(
        "table shape ({actual_rows}, {actual_cols}) does not match the \
         {regions}-region schema ({expected_rows}, {expected_cols})"
    )]
    SchemaMismatch {
        regions: usize,
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    /// Row count from which no whole region count can be inferred
    #[error(
        "table with {rows} rows cannot hold whole {sectors}-sector region \
         blocks plus {trailing} factor/total rows"
    )]
    RegionInference {
        rows: usize,
        sectors: usize,
        trailing: usize,
    },

    /// Pivoted emission table too narrow for the direct-emission block
    #[error(
        "pivoted table has {actual} entity columns, need at least {expected} \
         for the {regions}-region emission block"
    )]
    EntityColumns {
        regions: usize,
        expected: usize,
        actual: usize,
    },

    /// Grouping-key labels out of step with the pivoted data rows
    #[error("{labels} row labels for {rows} data rows")]
    RowLabelMismatch { labels: usize, rows: usize },

    /// Structural failure inside the block algebra
    #[error(transparent)]
    Block(#[from] BlockError),

    /// Opaque failure inside a TabularSource implementation
    #[error("tabular source error: {0}")]
    Source(#[from] anyhow::Error),
}

/// Result type alias for model construction
pub type ModelResult<T> = Result<T, ModelError>;
