//! # MRIO - Block-Structured Input-Output Analysis
//!
//! This is the **meta crate** that re-exports the MRIO stack components for
//! convenient access.
//!
//! ## Components
//!
//! ### Block-Matrix Core ([`core`])
//!
//! Region/sector-tagged dense matrices with a closed operator algebra:
//! arithmetic with safe division, signed block subsetting, block-diagonal
//! zeroing and reshaping, chunked aggregation, inversion.
//!
//! ```
//! use mrio::core::BlockMatrix;
//!
//! let x = BlockMatrix::from_vec(vec![10.0, 20.0], &[2], 2, 1).unwrap();
//! let regional = x.col_sum(Some(1)).unwrap();
//! assert_eq!(regional.to_vec(), vec![10.0, 20.0]);
//! ```
//!
//! ### Model Builders ([`model`])
//!
//! Assembly of MRIO and environmental-extension models from year-indexed
//! raw tables behind the [`model::TabularSource`] boundary, including the
//! optional Leontief-inverse derivation.
//!
//! ```no_run
//! use mrio::prelude::*;
//!
//! fn output_multipliers(source: &impl TabularSource) -> Result<(), ModelError> {
//!     let model = MrioModel::from_source_full(source, 2011)?;
//!     let b = &model.leontief.as_ref().unwrap().b;
//!     let multipliers = b.col_sum(None)?;
//!     println!("{:?}", multipliers.shape());
//!     Ok(())
//! }
//! ```

#![deny(warnings)]

// Re-export all components
pub use mrio_core as core;
pub use mrio_model as model;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use mrio::prelude::*;
    //!
    //! let ones = BlockMatrix::ones(&[4], 2, 2);
    //! assert_eq!(ones.col_sum(Some(2)).unwrap().to_vec(), vec![2.0, 2.0]);
    //! ```

    // Core types
    pub use crate::core::{BlockMatrix, BlockError, Dtype};

    // Index generators
    pub use crate::core::index::{country_inds, sector_inds};

    // Model builders
    pub use crate::model::{EeModel, Leontief, ModelError, MrioModel, MrioSchema, RowLabels};

    // Source boundary
    pub use crate::model::{EeTable, TabularSource};
}
