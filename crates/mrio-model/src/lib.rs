//! # mrio-model
//!
//! Builders that turn raw year-indexed tables into block-structured MRIO
//! and environmental-extension models.
//!
//! - **[`MrioModel`]**: partitions a raw table into output, intermediate
//!   flows, final demand, and value added; optionally derives the
//!   technical-coefficient matrix and the Leontief inverse
//! - **[`EeModel`]**: splits a pivoted emission table into direct and
//!   final-demand emission blocks
//! - **[`TabularSource`]**: the boundary to whatever store produces the
//!   raw tables; implementations live outside this crate
//! - **[`MrioSchema`](schema::MrioSchema)**: the named table layout every
//!   slice goes through, validated before extraction
//!
//! ## Quick Start
//!
//! ```no_run
//! use mrio_model::{ModelError, MrioModel, TabularSource};
//!
//! fn leontief_demand(source: &impl TabularSource) -> Result<(), ModelError> {
//!     let model = MrioModel::from_source_full(source, 2011)?;
//!     let leontief = model.leontief.as_ref().expect("full derivation requested");
//!
//!     // Total output required per unit of final demand.
//!     let requirement = leontief.b.matmul(&model.y)?;
//!     println!("{:?}", requirement.shape());
//!     Ok(())
//! }
//! ```
//!
//! Errors are typed and fail-fast ([`ModelError`]): a year outside the
//! source's set, a table shape that disagrees with the schema, and a
//! singular Leontief system all surface immediately with context.

#![deny(warnings)]

pub mod ee;
pub mod error;
pub mod model;
pub mod schema;
pub mod source;

pub use ee::{EeModel, RowLabels};
pub use error::{ModelError, ModelResult};
pub use model::{Leontief, MrioModel};
pub use schema::MrioSchema;
pub use source::{EeTable, TabularSource};
