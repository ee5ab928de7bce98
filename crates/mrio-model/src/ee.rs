//! Environmental-extension model assembly
//!
//! An emission table arrives pivoted: one row per grouping-key combination
//! (activity, gas, sector, or a single grand-total row) and one column per
//! economic entity. The first G·N entity columns are direct emissions
//! aligned with the sector-region pairs; whatever follows is final-demand
//! emissions. The region geometry of this dataset is fixed.

use mrio_core::BlockMatrix;
use scirs2_core::ndarray_ext::Array2;

use crate::error::{ModelError, ModelResult};
use crate::schema::{EE_REGIONS, SECTORS};
use crate::source::{ensure_year, TabularSource};

/// Row tags of a pivoted emission table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowLabels {
    /// No grouping requested: a single grand-total row.
    Total,
    /// One entry per row, each carrying its grouping-key values in the
    /// source's sort order.
    Groups(Vec<Vec<String>>),
}

/// An assembled environmental extension for one year.
#[derive(Debug, Clone)]
pub struct EeModel {
    /// The validated year the table was fetched for.
    pub year: i32,
    /// Direct emissions, one column per sector-region pair.
    pub e: BlockMatrix,
    /// Final-demand emissions, the remaining entity columns.
    pub ef: BlockMatrix,
    /// What each row represents.
    pub rows: RowLabels,
}

impl EeModel {
    /// Assemble the extension for `year`, aggregated over the given
    /// grouping keys (empty = grand total).
    pub fn from_source<S: TabularSource>(
        source: &S,
        year: i32,
        by: &[String],
    ) -> ModelResult<Self> {
        ensure_year(source, year)?;
        let table = source.fetch_ee(year, by)?;

        let pairs = EE_REGIONS * SECTORS;
        if table.data.ncols() < pairs {
            return Err(ModelError::EntityColumns {
                regions: EE_REGIONS,
                expected: pairs,
                actual: table.data.ncols(),
            });
        }

        let nrows = table.data.nrows();
        let rows = if by.is_empty() {
            if nrows != 1 {
                return Err(ModelError::RowLabelMismatch {
                    labels: 1,
                    rows: nrows,
                });
            }
            RowLabels::Total
        } else {
            if table.rows.len() != nrows {
                return Err(ModelError::RowLabelMismatch {
                    labels: table.rows.len(),
                    rows: nrows,
                });
            }
            RowLabels::Groups(table.rows)
        };
        tracing::debug!(year, rows = nrows, entities = table.data.ncols(), "loaded EE table");

        let e = Array2::from_shape_fn((nrows, pairs), |(i, j)| table.data[[i, j]]);
        let ef = Array2::from_shape_fn((nrows, table.data.ncols() - pairs), |(i, j)| {
            table.data[[i, pairs + j]]
        });

        Ok(Self {
            year,
            e: BlockMatrix::from_array(e.into_dyn(), EE_REGIONS, SECTORS)?,
            ef: BlockMatrix::from_array(ef.into_dyn(), EE_REGIONS, SECTORS)?,
            rows,
        })
    }
}
