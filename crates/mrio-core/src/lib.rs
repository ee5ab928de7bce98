//! # mrio-core
//!
//! Block-partitioned matrix algebra for multi-regional input-output (MRIO)
//! tables.
//!
//! An MRIO table is a dense matrix partitioned into `G` region blocks of
//! `N` sectors each. This crate provides the foundational building blocks
//! for computing over that structure:
//!
//! - **Block-tagged tensors** ([`BlockMatrix`]): rank-1/2 dense arrays
//!   carrying their region count and sector-block size through every
//!   operation
//! - **A closed operator algebra**: elementwise arithmetic with safe
//!   division, matrix products, inversion, Kronecker products
//! - **Block-aware structure operations**: signed subsetting, block-diagonal
//!   zeroing, chunked aggregation, fat-diagonal (de)composition
//! - **Index generators** ([`index`]) for regional and sectoral aggregates
//!
//! ## SciRS2 Integration
//!
//! This crate uses `scirs2-core` for all array operations and
//! `scirs2-linalg` for inversion. Direct use of `ndarray` is forbidden.
//!
//! ## Quick Start
//!
//! ```
//! use mrio_core::BlockMatrix;
//!
//! // A 2-region, 1-sector toy economy.
//! let x = BlockMatrix::from_vec(vec![10.0, 20.0], &[2], 2, 1).unwrap();
//! let z = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2], 2, 1).unwrap();
//!
//! // Technical coefficients: Z scaled column-wise by 1/x (safe on zeros).
//! let a = z.matmul(&x.div_from_scalar(1.0).diag()).unwrap();
//! assert!((a[&[0, 0]] - 0.1).abs() < 1e-12);
//! assert!((a[&[1, 1]] - 0.2).abs() < 1e-12);
//! ```
//!
//! ## Numeric Kinds
//!
//! Every matrix carries a logical [`Dtype`]: 0/1 indicators (identity
//! blocks, aggregators) widen to counts under additive operations so that
//! 1+1 can never wrap back into a truth value. Widening always happens on
//! the freshly allocated result; operands are immutable.
//!
//! ## Error Handling
//!
//! Structural failures are typed ([`BlockError`]) and fail fast with the
//! offending index, chunk, or shape; nothing is caught or retried
//! internally. The only deliberate numeric policy is safe division
//! (zero denominators yield zero), applied locally inside the division
//! operations.

#![deny(warnings)]

pub mod block;
pub mod error;
pub mod index;


pub use block::{BlockMatrix, Dtype};
pub use error::{BlockError, BlockResult};
