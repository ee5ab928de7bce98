//! Signed block subsetting and block-diagonal zeroing
//!
//! Block selections are 1-based and sign-encoded: a positive index `k` keeps
//! region block `k`, a negative index `-k` keeps the complement (every other
//! block, the "rest of world"), and 0 / omitted keeps the whole axis. An
//! axis whose length does not tile into sector blocks is treated as
//! region-granular (block length 1). Out-of-range indices fail fast.

use scirs2_core::ndarray_ext::Axis;

use super::types::BlockMatrix;
use crate::error::{BlockError, BlockResult};

/// Resolve a signed 1-based block selection into element indices along an
/// axis of `axis_len` elements partitioned into blocks of `block`.
fn block_indices(sel: isize, axis_len: usize, block: usize) -> BlockResult<Vec<usize>> {
    let blocks = axis_len / block;
    let k = sel.unsigned_abs();
    if k == 0 || k > blocks {
        return Err(BlockError::InvalidIndex { index: sel, blocks });
    }
    let start = (k - 1) * block;
    let end = k * block;
    if sel > 0 {
        Ok((start..end).collect())
    } else {
        Ok((0..axis_len).filter(|&i| i < start || i >= end).collect())
    }
}

impl BlockMatrix {
    /// Select one region block (positive index) or its complement (negative
    /// index) along the row and/or column axis; `None` or 0 keeps the whole
    /// axis. Vectors subset along their single axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::BlockMatrix;
    ///
    /// // Three regions of two sectors.
    /// let x = BlockMatrix::from_vec(
    ///     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[6], 3, 2,
    /// ).unwrap();
    ///
    /// // Region 2's own block, and everything but region 2.
    /// assert_eq!(x.subset(Some(2), None).unwrap().to_vec(), vec![3.0, 4.0]);
    /// assert_eq!(
    ///     x.subset(Some(-2), None).unwrap().to_vec(),
    ///     vec![1.0, 2.0, 5.0, 6.0],
    /// );
    /// ```
    pub fn subset(&self, row: Option<isize>, col: Option<isize>) -> BlockResult<BlockMatrix> {
        let mut data = self.data.clone();

        if let Some(r) = row.filter(|&r| r != 0) {
            let len = self.shape()[0];
            let ix = block_indices(r, len, self.block_len(len))?;
            data = data.select(Axis(0), &ix);
        }

        if let Some(c) = col.filter(|&c| c != 0) {
            if self.rank() != 2 {
                return Err(BlockError::RankMismatch {
                    operation: "subset",
                    expected: 2,
                    actual: self.rank(),
                });
            }
            let len = self.shape()[1];
            let ix = block_indices(c, len, self.block_len(len))?;
            data = data.select(Axis(1), &ix);
        }

        Ok(BlockMatrix::from_parts(data, self.dtype, self.g, self.n))
    }

    /// Zero out block-diagonal content.
    ///
    /// With `block = None`, zeroes the n×n block (k, k) for every region k,
    /// leaving inter-region blocks intact. With `block = Some((row, col))`,
    /// zeroes that specific block, each coordinate carrying the same signed
    /// inclusion/exclusion semantics as [`BlockMatrix::subset`].
    ///
    /// With `inverse = true`, everything *except* the targeted content is
    /// zeroed; this is computed exactly as `original − zeroed`, so the
    /// two renditions always sum back to the original.
    pub fn zeroout(
        &self,
        block: Option<(isize, isize)>,
        inverse: bool,
    ) -> BlockResult<BlockMatrix> {
        if self.rank() != 2 {
            return Err(BlockError::RankMismatch {
                operation: "zeroout",
                expected: 2,
                actual: self.rank(),
            });
        }
        let (nr, nc) = (self.shape()[0], self.shape()[1]);
        let (br, bc) = (self.block_len(nr), self.block_len(nc));

        let mut zeroed = self.data.clone();
        match block {
            None => {
                let gg = nr.max(nc) / self.n.max(1);
                for k in 0..gg {
                    for i in (k * br).min(nr)..(k * br + br).min(nr) {
                        for j in (k * bc).min(nc)..(k * bc + bc).min(nc) {
                            zeroed[[i, j]] = 0.0;
                        }
                    }
                }
            }
            Some((row, col)) => {
                let rix = block_indices(row, nr, br)?;
                let cix = block_indices(col, nc, bc)?;
                for &i in &rix {
                    for &j in &cix {
                        zeroed[[i, j]] = 0.0;
                    }
                }
            }
        }

        let data = if inverse {
            &self.data - &zeroed
        } else {
            zeroed
        };
        Ok(BlockMatrix::from_parts(data, self.dtype, self.g, self.n))
    }
}
