//! Table layout schema for raw MRIO tables
//!
//! A raw year-filtered table carries `G·N` sector rows followed by 6 factor
//! rows and 1 total-output row, and `G·N` intermediate columns followed by
//! `G·f` final-demand columns and 1 total-output column. Rather than slicing
//! by bare positional offsets, every span is named here and the whole layout
//! is validated against the fetched table's actual shape before anything is
//! extracted.

use std::ops::Range;

use crate::error::{ModelError, ModelResult};

/// Sectors per region block in the base classification.
pub const SECTORS: usize = 35;

/// Final-demand categories per region.
pub const FINAL_DEMAND_CATEGORIES: usize = 5;

/// Factor-input rows between the sector rows and the total-output row.
pub const FACTOR_INPUT_ROWS: usize = 6;

/// Trailing non-sector rows: the factor-input rows plus the total-output row.
pub const TRAILING_ROWS: usize = FACTOR_INPUT_ROWS + 1;

/// Region count of the environmental-extension dataset.
pub const EE_REGIONS: usize = 73;

/// Named layout of a raw MRIO table for a given region count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MrioSchema {
    /// Number of region blocks (G).
    pub regions: usize,
    /// Sectors per region block (N).
    pub sectors: usize,
    /// Final-demand categories per region (f).
    pub categories: usize,
}

impl MrioSchema {
    /// Schema for `regions` region blocks under the base classification.
    pub fn new(regions: usize) -> Self {
        Self {
            regions,
            sectors: SECTORS,
            categories: FINAL_DEMAND_CATEGORIES,
        }
    }

    /// Infer the region count from a fetched table's row count.
    ///
    /// The sector rows must tile into whole region blocks; a remainder
    /// means the table does not have the documented layout and fails fast
    /// rather than silently truncating.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_model::schema::MrioSchema;
    ///
    /// let schema = MrioSchema::infer(2 * 35 + 7).unwrap();
    /// assert_eq!(schema.regions, 2);
    /// assert!(MrioSchema::infer(2 * 35 + 8).is_err());
    /// ```
    pub fn infer(nrows: usize) -> ModelResult<Self> {
        let sector_rows = nrows.checked_sub(TRAILING_ROWS).unwrap_or(0);
        if nrows <= TRAILING_ROWS || sector_rows % SECTORS != 0 {
            return Err(ModelError::RegionInference {
                rows: nrows,
                sectors: SECTORS,
                trailing: TRAILING_ROWS,
            });
        }
        Ok(Self::new(sector_rows / SECTORS))
    }

    /// Sector-region pairs (`G·N`).
    pub fn pairs(&self) -> usize {
        self.regions * self.sectors
    }

    /// Expected total row count.
    pub fn nrows(&self) -> usize {
        self.pairs() + TRAILING_ROWS
    }

    /// Expected total column count.
    pub fn ncols(&self) -> usize {
        self.pairs() + self.regions * self.categories + 1
    }

    /// Validate the fetched table's shape against this schema.
    pub fn validate(&self, nrows: usize, ncols: usize) -> ModelResult<()> {
        if nrows != self.nrows() || ncols != self.ncols() {
            return Err(ModelError::SchemaMismatch {
                regions: self.regions,
                expected_rows: self.nrows(),
                expected_cols: self.ncols(),
                actual_rows: nrows,
                actual_cols: ncols,
            });
        }
        Ok(())
    }

    /// Intermediate-flow columns (the Z block).
    pub fn intermediate_cols(&self) -> Range<usize> {
        0..self.pairs()
    }

    /// Disaggregated final-demand columns (the Y_big block).
    pub fn final_demand_cols(&self) -> Range<usize> {
        self.pairs()..self.pairs() + self.regions * self.categories
    }

    /// The trailing total-output column.
    pub fn output_col(&self) -> usize {
        self.ncols() - 1
    }

    /// Sector rows (the Z / Y_big row span).
    pub fn sector_rows(&self) -> Range<usize> {
        0..self.pairs()
    }

    /// Factor-input rows, summed per column into value added.
    pub fn factor_rows(&self) -> Range<usize> {
        self.pairs()..self.pairs() + FACTOR_INPUT_ROWS
    }

    /// The trailing total-output row.
    pub fn output_row(&self) -> usize {
        self.nrows() - 1
    }
}
