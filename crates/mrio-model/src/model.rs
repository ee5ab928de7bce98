//! MRIO model assembly
//!
//! Partitions a raw year-filtered table into its named block components and
//! optionally derives the technical-coefficient matrix and the Leontief
//! inverse. All slicing goes through the named spans of
//! [`MrioSchema`](crate::schema::MrioSchema), validated against the fetched
//! table before any extraction.

use mrio_core::BlockMatrix;
use scirs2_core::ndarray_ext::{Array1, Array2};

use crate::error::ModelResult;
use crate::schema::MrioSchema;
use crate::source::{ensure_year, TabularSource};

/// The derived coefficient quantities, present only on request: deriving
/// them costs a full matrix inversion, which can fail on degenerate data.
#[derive(Debug, Clone)]
pub struct Leontief {
    /// Value-added coefficients `va ⊘ x` (zero where output is zero).
    pub v: BlockMatrix,
    /// Technical coefficients: Z scaled column-wise by `1 ⊘ x`.
    pub a: BlockMatrix,
    /// Leontief inverse `(I − A)⁻¹`.
    pub b: BlockMatrix,
}

/// An assembled multi-regional input-output model for one year.
#[derive(Debug, Clone)]
pub struct MrioModel {
    /// The validated year the table was fetched for.
    pub year: i32,
    /// The table layout the components were sliced by.
    pub schema: MrioSchema,
    /// Total output per sector-region pair, length G·N.
    pub x: BlockMatrix,
    /// Intermediate-flow matrix, (G·N)×(G·N).
    pub z: BlockMatrix,
    /// Final demand disaggregated per category, (G·N)×(G·f).
    pub y_big: BlockMatrix,
    /// Final demand aggregated to one column per region, (G·N)×G.
    pub y: BlockMatrix,
    /// Value added per sector-region pair, length G·N.
    pub va: BlockMatrix,
    /// Derived coefficients, when the full derivation was requested.
    pub leontief: Option<Leontief>,
}

impl MrioModel {
    /// Assemble the named components for `year` without the coefficient
    /// derivation.
    pub fn from_source<S: TabularSource>(source: &S, year: i32) -> ModelResult<Self> {
        Self::build(source, year, false)
    }

    /// Assemble the components and derive `v`, `A`, and the Leontief
    /// inverse `B`. Fails with a singular-matrix error when `I − A` cannot
    /// be inverted.
    pub fn from_source_full<S: TabularSource>(source: &S, year: i32) -> ModelResult<Self> {
        Self::build(source, year, true)
    }

    fn build<S: TabularSource>(source: &S, year: i32, full: bool) -> ModelResult<Self> {
        ensure_year(source, year)?;
        let table = source.fetch_mrio(year)?;

        let schema = MrioSchema::infer(table.nrows())?;
        schema.validate(table.nrows(), table.ncols())?;
        tracing::debug!(
            year,
            regions = schema.regions,
            rows = table.nrows(),
            cols = table.ncols(),
            "loaded MRIO table"
        );

        let (g, n) = (schema.regions, schema.sectors);
        let pairs = schema.pairs();

        // Named component slices.
        let x: Array1<f64> = schema
            .intermediate_cols()
            .map(|j| table[[schema.output_row(), j]])
            .collect();
        let z = Array2::from_shape_fn((pairs, pairs), |(i, j)| table[[i, j]]);
        let fd0 = schema.final_demand_cols().start;
        let y_big = Array2::from_shape_fn((pairs, schema.final_demand_cols().len()), |(i, j)| {
            table[[i, fd0 + j]]
        });
        let va: Array1<f64> = schema
            .intermediate_cols()
            .map(|j| schema.factor_rows().map(|r| table[[r, j]]).sum::<f64>())
            .collect();

        let x = BlockMatrix::from_array(x.into_dyn(), g, n)?;
        let z = BlockMatrix::from_array(z.into_dyn(), g, n)?;
        let y_big = BlockMatrix::from_array(y_big.into_dyn(), g, n)?;
        let va = BlockMatrix::from_array(va.into_dyn(), g, n)?;

        // Aggregate the f final-demand categories down to one column per
        // region through the block-sum aggregator I_G ⊗ 1.
        let aggregator = BlockMatrix::identity(g, g, n)
            .kron(&BlockMatrix::indicator_ones(&[schema.categories, 1], g, n))?;
        let y = y_big.matmul(&aggregator)?;

        let leontief = if full {
            Some(Self::derive(&x, &z, &va, g, n)?)
        } else {
            None
        };

        Ok(Self {
            year,
            schema,
            x,
            z,
            y_big,
            y,
            va,
            leontief,
        })
    }

    /// Derive the coefficient quantities from output, flows, and value
    /// added. Division by zero output yields zero coefficients.
    fn derive(
        x: &BlockMatrix,
        z: &BlockMatrix,
        va: &BlockMatrix,
        g: usize,
        n: usize,
    ) -> ModelResult<Leontief> {
        let v = va.div(x)?;
        let a = z.matmul(&x.div_from_scalar(1.0).diag())?;
        let identity = BlockMatrix::identity(g * n, g, n);
        let b = a.sub_from(&identity)?.invert()?;
        tracing::debug!(dim = g * n, "derived Leontief inverse");
        Ok(Leontief { v, a, b })
    }
}
