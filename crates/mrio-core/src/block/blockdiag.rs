//! Block-diagonal composition and decomposition
//!
//! These operations move data between three renditions of the same
//! region-partitioned quantity: a flat vector of length G·N, a tall
//! (G·N)×G matrix with one region segment per column (the "fat diagonal"),
//! and an N×(G·N) row of per-region diagonal blocks. The column-major
//! flattening of [`BlockMatrix::asvector`] is what keeps these renditions
//! mutually consistent.
//!
//! An axis that does not tile into sector blocks degrades to block length 1,
//! under which the (de)composition reduces to the ordinary diagonal.

use scirs2_core::ndarray_ext::{Array1, Array2, Axis};

use super::types::{BlockMatrix, Dtype};
use crate::error::{BlockError, BlockResult};

/// Expand a flat vector into the tall block-diagonal matrix: segment k of
/// length `block` goes down column k, zero elsewhere.
fn expand_diagvec(v: &Array1<f64>, block: usize) -> Array2<f64> {
    let len = v.len();
    let gg = len / block;
    let mut out = Array2::<f64>::zeros((len, gg));
    for k in 0..gg {
        for i in 0..block {
            out[[k * block + i, k]] = v[k * block + i];
        }
    }
    out
}

impl BlockMatrix {
    /// Flatten a matrix into a vector column-major: first column, then the
    /// second, and so on. This ordering (not row-major) is what makes the
    /// result line up with [`BlockMatrix::diagvec`]'s column layout.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::BlockMatrix;
    ///
    /// let m = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2], 2, 1).unwrap();
    /// assert_eq!(m.asvector().to_vec(), vec![1.0, 3.0, 2.0, 4.0]);
    /// ```
    pub fn asvector(&self) -> BlockMatrix {
        let flat: Vec<f64> = self.data.t().iter().cloned().collect();
        BlockMatrix::from_parts(
            Array1::from_vec(flat).into_dyn(),
            self.dtype,
            self.g,
            self.n,
        )
    }

    /// Extract the N-length diagonal block column-slices: for each region k,
    /// rows `k·N..(k+1)·N` of column k, concatenated into one vector. The
    /// inverse-direction counterpart of [`BlockMatrix::diagvec`].
    pub fn get_fatdiag(&self) -> BlockResult<BlockMatrix> {
        let m = self.to_matrix("get_fatdiag")?;
        let block = self.block_len(m.nrows());
        let gg = m.nrows() / block;
        if m.ncols() < gg {
            return Err(BlockError::ShapeMismatch {
                operation: "get_fatdiag",
                left: self.shape().to_vec(),
                right: vec![gg * block, gg],
            });
        }
        let mut out = Vec::with_capacity(gg * block);
        for k in 0..gg {
            for i in 0..block {
                out.push(m[[k * block + i, k]]);
            }
        }
        Ok(BlockMatrix::from_parts(
            Array1::from_vec(out).into_dyn(),
            self.dtype,
            self.g,
            self.n,
        ))
    }

    /// Split a vector of length G·N into G segments of length N and place
    /// each segment down its own column of a (G·N)×G matrix, zero
    /// elsewhere.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::BlockMatrix;
    ///
    /// let v = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4], 2, 2).unwrap();
    /// let m = v.diagvec().unwrap();
    /// assert_eq!(m.shape(), &[4, 2]);
    /// assert_eq!(m[&[1, 0]], 2.0);
    /// assert_eq!(m[&[2, 1]], 3.0);
    /// assert_eq!(m[&[2, 0]], 0.0);
    /// ```
    pub fn diagvec(&self) -> BlockResult<BlockMatrix> {
        let v = self.squeezed_vector("diagvec")?;
        let block = self.block_len(v.len());
        Ok(BlockMatrix::from_parts(
            expand_diagvec(&v, block).into_dyn(),
            Dtype::Float64,
            self.g,
            self.n,
        ))
    }

    /// Reshape a (G·N)×G matrix into block-diagonal form.
    ///
    /// With `offd = false`, keeps only the diagonal-block contribution: the
    /// fat-diagonal entries are extracted and re-expanded. With
    /// `offd = true`, keeps only the off-block-diagonal contribution: the
    /// diagonal blocks are zeroed, each row is summed across the remaining
    /// columns, and the resulting vector is re-expanded.
    pub fn diagmat(&self, offd: bool) -> BlockResult<BlockMatrix> {
        let m = self.to_matrix("diagmat")?;
        let block = self.block_len(m.nrows());
        let gg = m.nrows() / block;
        if m.ncols() < gg {
            return Err(BlockError::ShapeMismatch {
                operation: "diagmat",
                left: self.shape().to_vec(),
                right: vec![gg * block, gg],
            });
        }

        let vector = if offd {
            let mut work = m.clone();
            for k in 0..gg {
                for i in 0..block {
                    work[[k * block + i, k]] = 0.0;
                }
            }
            work.sum_axis(Axis(1))
        } else {
            let mut out = Vec::with_capacity(gg * block);
            for k in 0..gg {
                for i in 0..block {
                    out.push(m[[k * block + i, k]]);
                }
            }
            Array1::from_vec(out)
        };

        Ok(BlockMatrix::from_parts(
            expand_diagvec(&vector, block).into_dyn(),
            Dtype::Float64,
            self.g,
            self.n,
        ))
    }

    /// Split a vector of length G·N into G segments of length N,
    /// diagonalize each segment, and concatenate the G diagonal matrices
    /// horizontally into one N×(G·N) matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::BlockMatrix;
    ///
    /// let v = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4], 2, 2).unwrap();
    /// let m = v.diagrow().unwrap();
    /// assert_eq!(m.shape(), &[2, 4]);
    /// assert_eq!(m.to_vec(), vec![
    ///     1.0, 0.0, 3.0, 0.0,
    ///     0.0, 2.0, 0.0, 4.0,
    /// ]);
    /// ```
    pub fn diagrow(&self) -> BlockResult<BlockMatrix> {
        let v = self.squeezed_vector("diagrow")?;
        let block = self.block_len(v.len());
        let gg = v.len() / block;
        let mut out = Array2::<f64>::zeros((block, gg * block));
        for k in 0..gg {
            for i in 0..block {
                out[[i, k * block + i]] = v[k * block + i];
            }
        }
        Ok(BlockMatrix::from_parts(
            out.into_dyn(),
            Dtype::Float64,
            self.g,
            self.n,
        ))
    }

    /// The operand as a rank-1 array, squeezing a single-row or
    /// single-column matrix.
    fn squeezed_vector(&self, operation: &'static str) -> BlockResult<Array1<f64>> {
        match self.rank() {
            1 => self.to_vector(operation),
            2 if self.shape()[0] == 1 || self.shape()[1] == 1 => {
                Ok(Array1::from_vec(self.to_vec()))
            }
            _ => Err(BlockError::RankMismatch {
                operation,
                expected: 1,
                actual: self.rank(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asvector_column_major() {
        let m = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], 1, 2).unwrap();
        // Columns read top to bottom: [1,4], [2,5], [3,6].
        assert_eq!(m.asvector().to_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_fatdiag_diagvec_roundtrip() {
        let v = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[6], 2, 3).unwrap();
        let tall = v.diagvec().unwrap();
        assert_eq!(tall.shape(), &[6, 2]);
        let back = tall.get_fatdiag().unwrap();
        assert_eq!(back.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_diagvec_layout() {
        let v = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4], 2, 2).unwrap();
        let m = v.diagvec().unwrap();
        assert_eq!(m.to_vec(), vec![
            1.0, 0.0, //
            2.0, 0.0, //
            0.0, 3.0, //
            0.0, 4.0, //
        ]);
    }

    #[test]
    fn test_diagvec_accepts_column_matrix() {
        let col = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4, 1], 2, 2).unwrap();
        let m = col.diagvec().unwrap();
        assert_eq!(m.shape(), &[4, 2]);
        assert_eq!(m[&[3, 1]], 4.0);
    }

    #[test]
    fn test_diagmat_keeps_diagonal_blocks() {
        let m = BlockMatrix::from_vec(
            vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0],
            &[4, 2],
            2,
            2,
        )
        .unwrap();
        let d = m.diagmat(false).unwrap();
        assert_eq!(d.shape(), &[4, 2]);
        assert_eq!(d.to_vec(), vec![
            1.0, 0.0, //
            2.0, 0.0, //
            0.0, 30.0, //
            0.0, 40.0, //
        ]);
    }

    #[test]
    fn test_diagmat_collapses_off_diagonal() {
        let m = BlockMatrix::from_vec(
            vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0],
            &[4, 2],
            2,
            2,
        )
        .unwrap();
        let d = m.diagmat(true).unwrap();
        assert_eq!(d.to_vec(), vec![
            10.0, 0.0, //
            20.0, 0.0, //
            0.0, 3.0, //
            0.0, 4.0, //
        ]);
    }

    #[test]
    fn test_diagrow_spec_layout() {
        let v = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4], 2, 2).unwrap();
        let m = v.diagrow().unwrap();
        assert_eq!(m.shape(), &[2, 4]);
        assert_eq!(m.to_vec(), vec![
            1.0, 0.0, 3.0, 0.0, //
            0.0, 2.0, 0.0, 4.0, //
        ]);
    }

    #[test]
    fn test_diagrow_rejects_matrix() {
        let m = BlockMatrix::from_vec((1..=16).map(f64::from).collect(), &[4, 4], 2, 2).unwrap();
        assert!(matches!(
            m.diagrow(),
            Err(BlockError::RankMismatch { .. })
        ));
    }
}
