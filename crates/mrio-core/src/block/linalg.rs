//! Diagonal extraction, inversion, Kronecker products, transposition
//!
//! Inversion goes through `scirs2_linalg`; a singular matrix surfaces as
//! [`BlockError::Singular`] and is never recovered here.

use scirs2_core::ndarray_ext::{Array1, Array2};

use super::types::{BlockMatrix, Dtype};
use crate::error::{BlockError, BlockResult};

impl BlockMatrix {
    /// Diagonal in both directions: a matrix yields its main diagonal as a
    /// vector, a vector yields the matrix with those entries on the
    /// diagonal. The caller chooses the behavior through the operand's rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::BlockMatrix;
    ///
    /// let x = BlockMatrix::from_vec(vec![2.0, 3.0], &[2], 2, 1).unwrap();
    /// let d = x.diag();
    /// assert_eq!(d.shape(), &[2, 2]);
    /// assert_eq!(d[&[0, 0]], 2.0);
    /// assert_eq!(d[&[0, 1]], 0.0);
    ///
    /// let back = d.diag();
    /// assert_eq!(back.to_vec(), vec![2.0, 3.0]);
    /// ```
    pub fn diag(&self) -> BlockMatrix {
        let data = match self.rank() {
            1 => {
                let v = self
                    .to_vector("diag")
                    .expect("rank checked at construction");
                Array2::from_diag(&v).into_dyn()
            }
            _ => {
                let m = self
                    .to_matrix("diag")
                    .expect("rank checked at construction");
                m.diag().to_owned().into_dyn()
            }
        };
        BlockMatrix::from_parts(data, self.dtype, self.g, self.n)
    }

    /// Full matrix inverse.
    ///
    /// Fails with [`BlockError::RankMismatch`] / [`BlockError::ShapeMismatch`]
    /// on a non-square operand and with [`BlockError::Singular`] when the
    /// matrix is not invertible.
    pub fn invert(&self) -> BlockResult<BlockMatrix> {
        let m = self.to_matrix("invert")?;
        if !self.is_square() {
            return Err(BlockError::ShapeMismatch {
                operation: "invert",
                left: self.shape().to_vec(),
                right: self.shape().to_vec(),
            });
        }
        let inverse = scirs2_linalg::inv(&m.view(), None)?;
        Ok(BlockMatrix::from_parts(
            inverse.into_dyn(),
            Dtype::Float64,
            self.g,
            self.n,
        ))
    }

    /// Kronecker product `self ⊗ other`.
    ///
    /// Two matrices produce the usual block matrix; two vectors produce the
    /// flattened rank-1 product. The dtype promotes without widening
    /// (products of indicators stay 0/1), which is how the block-sum
    /// aggregator `I_g ⊗ 1` keeps its indicator kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::BlockMatrix;
    ///
    /// let i = BlockMatrix::identity(2, 2, 1);
    /// let ones = BlockMatrix::indicator_ones(&[1, 3], 2, 1);
    /// let agg = i.kron(&ones).unwrap();
    /// assert_eq!(agg.shape(), &[2, 6]);
    /// assert_eq!(agg[&[0, 2]], 1.0);
    /// assert_eq!(agg[&[0, 3]], 0.0);
    /// ```
    pub fn kron(&self, other: &BlockMatrix) -> BlockResult<BlockMatrix> {
        let both_vectors = self.rank() == 1 && other.rank() == 1;
        let a = self.as_2d();
        let b = other.as_2d();
        let (m, n) = (a.shape()[0], a.shape()[1]);
        let (p, q) = (b.shape()[0], b.shape()[1]);

        let mut result = Array2::<f64>::zeros((m * p, n * q));
        for i in 0..m {
            for j in 0..n {
                let a_val = a[[i, j]];
                for bi in 0..p {
                    for bj in 0..q {
                        result[[i * p + bi, j * q + bj]] = a_val * b[[bi, bj]];
                    }
                }
            }
        }

        let data = if both_vectors {
            let flat: Vec<f64> = result.iter().cloned().collect();
            Array1::from_vec(flat).into_dyn()
        } else {
            result.into_dyn()
        };
        Ok(BlockMatrix::from_parts(
            data,
            self.dtype.promote(other.dtype),
            self.g,
            self.n,
        ))
    }

    /// Transpose. A vector is returned unchanged.
    pub fn t(&self) -> BlockMatrix {
        BlockMatrix::from_parts(self.data.t().to_owned(), self.dtype, self.g, self.n)
    }

    /// Rank-2 view of the data, promoting a vector to a single row.
    fn as_2d(&self) -> Array2<f64> {
        match self.rank() {
            1 => {
                let v = self
                    .to_vector("kron")
                    .expect("rank checked at construction");
                Array2::from_shape_vec((1, v.len()), v.to_vec())
                    .expect("row promotion preserves length")
            }
            _ => self
                .to_matrix("kron")
                .expect("rank checked at construction"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diag_roundtrip() {
        let v = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0], &[3], 3, 1).unwrap();
        let d = v.diag();
        assert_eq!(d.shape(), &[3, 3]);
        assert_eq!(d[&[2, 2]], 3.0);
        assert_eq!(d[&[2, 1]], 0.0);
        assert_eq!(d.diag().to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_invert_identity() {
        let i = BlockMatrix::identity(3, 3, 1);
        let inv = i.invert().unwrap();
        for k in 0..3 {
            assert!((inv[&[k, k]] - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_invert_two_by_two() {
        // [[4, 7], [2, 6]] has determinant 10.
        let m = BlockMatrix::from_vec(vec![4.0, 7.0, 2.0, 6.0], &[2, 2], 1, 2).unwrap();
        let inv = m.invert().unwrap();
        assert!((inv[&[0, 0]] - 0.6).abs() < 1e-12);
        assert!((inv[&[0, 1]] + 0.7).abs() < 1e-12);
        assert!((inv[&[1, 0]] + 0.2).abs() < 1e-12);
        assert!((inv[&[1, 1]] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_invert_singular_fails() {
        let m = BlockMatrix::from_vec(vec![1.0, 2.0, 2.0, 4.0], &[2, 2], 1, 2).unwrap();
        assert!(matches!(m.invert(), Err(BlockError::Singular(_))));
    }

    #[test]
    fn test_invert_rejects_vector() {
        let v = BlockMatrix::from_vec(vec![1.0, 2.0], &[2], 2, 1).unwrap();
        assert!(matches!(
            v.invert(),
            Err(BlockError::RankMismatch { .. })
        ));
    }

    #[test]
    fn test_kron_block_structure() {
        let i = BlockMatrix::identity(2, 2, 1);
        let ones = BlockMatrix::indicator_ones(&[3, 1], 2, 1);
        let agg = i.kron(&ones).unwrap();
        assert_eq!(agg.shape(), &[6, 2]);
        // First block column picks up the first three rows only.
        assert_eq!(agg[&[0, 0]], 1.0);
        assert_eq!(agg[&[2, 0]], 1.0);
        assert_eq!(agg[&[3, 0]], 0.0);
        assert_eq!(agg[&[3, 1]], 1.0);
        assert!(agg.dtype().is_indicator());
    }

    #[test]
    fn test_kron_vectors_stay_rank_one() {
        let a = BlockMatrix::from_vec(vec![1.0, 2.0], &[2], 2, 1).unwrap();
        let b = BlockMatrix::from_vec(vec![10.0, 100.0], &[2], 2, 1).unwrap();
        let k = a.kron(&b).unwrap();
        assert_eq!(k.shape(), &[4]);
        assert_eq!(k.to_vec(), vec![10.0, 100.0, 20.0, 200.0]);
    }

    #[test]
    fn test_transpose() {
        let m = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3], 1, 2).unwrap();
        let mt = m.t();
        assert_eq!(mt.shape(), &[3, 2]);
        assert_eq!(mt[&[2, 0]], 3.0);
        assert_eq!(mt[&[0, 1]], 4.0);
    }
}
