//! Whole-axis and chunked reductions
//!
//! Chunked reductions are the canonical way regional totals are derived from
//! sector-level data: the axis is partitioned into consecutive groups and
//! each group is summed through a 0/1 aggregator matrix product
//! (`I_g ⊗ 1`), never a manual loop. The chunk size must tile the axis into
//! exactly `g` groups; anything else fails fast.

use scirs2_core::ndarray_ext::{Array1, Axis};

use super::types::{BlockMatrix, Dtype};
use crate::error::{BlockError, BlockResult};

impl BlockMatrix {
    /// Sum down the columns.
    ///
    /// With `chunk = None`, reduces the whole row axis (a vector reduces to
    /// a single element). With `chunk = Some(k)`, partitions the rows into
    /// `g` consecutive groups of `k` and sums within each group via the
    /// aggregator product.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::BlockMatrix;
    ///
    /// // Two regions of three sectors each; regional totals of a ones
    /// // vector are the sector counts.
    /// let ones = BlockMatrix::ones(&[6], 2, 3);
    /// let totals = ones.col_sum(Some(3)).unwrap();
    /// assert_eq!(totals.to_vec(), vec![3.0, 3.0]);
    /// ```
    pub fn col_sum(&self, chunk: Option<usize>) -> BlockResult<BlockMatrix> {
        match chunk {
            None => {
                let data = if self.rank() == 1 {
                    Array1::from_vec(vec![self.data.sum()]).into_dyn()
                } else {
                    self.data.sum_axis(Axis(0)).into_dyn()
                };
                Ok(BlockMatrix::from_parts(
                    data,
                    self.reduced_dtype(),
                    self.g,
                    self.n,
                ))
            }
            Some(k) => {
                self.check_chunk("col_sum", self.shape()[0], k)?;
                let eye = BlockMatrix::identity(self.g, self.g, self.n);
                let ones = BlockMatrix::indicator_ones(&[1, k], self.g, self.n);
                let aggregator = eye.kron(&ones)?;
                aggregator.matmul(self)
            }
        }
    }

    /// Sum across the rows.
    ///
    /// With `chunk = None`, reduces the column axis of a matrix (vectors
    /// have no second axis and fail with rank context). With
    /// `chunk = Some(k)`, partitions the trailing axis into `g` consecutive
    /// groups of `k` and sums within each group. This is how a
    /// per-category final-demand matrix collapses to one column per region.
    pub fn row_sum(&self, chunk: Option<usize>) -> BlockResult<BlockMatrix> {
        match chunk {
            None => {
                if self.rank() != 2 {
                    return Err(BlockError::RankMismatch {
                        operation: "row_sum",
                        expected: 2,
                        actual: self.rank(),
                    });
                }
                Ok(BlockMatrix::from_parts(
                    self.data.sum_axis(Axis(1)).into_dyn(),
                    self.reduced_dtype(),
                    self.g,
                    self.n,
                ))
            }
            Some(k) => {
                let len = *self.shape().last().expect("rank checked at construction");
                self.check_chunk("row_sum", len, k)?;
                let eye = BlockMatrix::identity(self.g, self.g, self.n);
                let ones = BlockMatrix::indicator_ones(&[k, 1], self.g, self.n);
                let aggregator = eye.kron(&ones)?;
                self.matmul(&aggregator)
            }
        }
    }

    /// Chunk validity: `k` must divide the axis and tile it into exactly
    /// `g` groups (the aggregator is `g`-block shaped).
    fn check_chunk(&self, operation: &'static str, len: usize, chunk: usize) -> BlockResult<()> {
        if chunk == 0 || len % chunk != 0 {
            return Err(BlockError::ChunkMismatch { len, chunk });
        }
        if len != self.g * chunk {
            return Err(BlockError::ShapeMismatch {
                operation,
                left: vec![self.g, chunk],
                right: vec![len],
            });
        }
        Ok(())
    }

    /// Summation promotes the indicator kind to counts.
    fn reduced_dtype(&self) -> Dtype {
        if self.dtype == Dtype::Bool {
            Dtype::UInt8
        } else {
            self.dtype
        }
    }
}
