//! Block-partitioned matrix type and its operator algebra
//!
//! The core [`BlockMatrix`] type lives in `types`; the algebra is organized
//! into operation modules so every result stays in the same representation,
//! carrying the region/sector tags forward.

// Core type definition
pub mod types;

// Operation modules (organized by functionality)
mod arith;
mod blockdiag;
mod linalg;
mod reduce;
mod subset;

// Re-export the main types
pub use types::{BlockMatrix, Dtype};
