//! The tabular-source boundary
//!
//! Year-indexed raw tables come from an external store (a Parquet file, a
//! database, a test fixture). The builders only need the three operations
//! below; everything about query construction, filtering, and pivoting
//! stays behind the trait. Implementations report their own failures as
//! opaque [`anyhow::Error`]s through [`ModelError::Source`].

use std::collections::BTreeSet;

use scirs2_core::ndarray_ext::Array2;

use crate::error::{ModelError, ModelResult};

/// A pivoted environmental-extension table: one row per grouping-key
/// combination (a single unlabeled row when no grouping was requested),
/// one column per entity.
#[derive(Debug, Clone)]
pub struct EeTable {
    /// Grouping-key values per row, in the source's sort order; empty when
    /// no grouping was requested.
    pub rows: Vec<Vec<String>>,
    /// Dense numeric table, rows aligned with `rows`.
    pub data: Array2<f64>,
}

/// A store of year-indexed MRIO and environmental-extension tables.
pub trait TabularSource {
    /// The set of years the store can produce.
    fn years(&self) -> BTreeSet<i32>;

    /// The raw MRIO table for one year, laid out per
    /// [`MrioSchema`](crate::schema::MrioSchema).
    fn fetch_mrio(&self, year: i32) -> ModelResult<Array2<f64>>;

    /// The pivoted emission table for one year, aggregated over the given
    /// grouping keys (empty = grand total, one row).
    fn fetch_ee(&self, year: i32, by: &[String]) -> ModelResult<EeTable>;
}

/// Validate a requested year against the source's reported set.
pub(crate) fn ensure_year(source: &impl TabularSource, year: i32) -> ModelResult<()> {
    let years = source.years();
    if years.contains(&year) {
        Ok(())
    } else {
        Err(ModelError::InvalidYear {
            year,
            available: years.into_iter().collect(),
        })
    }
}
