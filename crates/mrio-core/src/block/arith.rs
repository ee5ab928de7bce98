//! Elementwise arithmetic and matrix products
//!
//! All binary operations accept broadcast-compatible operand shapes
//! (trailing-axis alignment, size-1 axes stretch) and allocate a fresh
//! result; operands are never mutated. Division uses the safe-divide
//! convention: a zero denominator yields 0 at that position, applied locally
//! here rather than through any process-wide numeric-error state.

use scirs2_core::ndarray_ext::{IxDyn, Zip};

use super::types::{BlockMatrix, Dtype};
use crate::error::{BlockError, BlockResult};

/// Safe division: a zero denominator maps to 0, not infinity or NaN.
#[inline]
fn safe_div(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Broadcast shape of two operands under trailing-axis alignment.
fn broadcast_shape(
    left: &[usize],
    right: &[usize],
    operation: &'static str,
) -> BlockResult<Vec<usize>> {
    let rank = left.len().max(right.len());
    let mut out = vec![1usize; rank];
    for (i, &d) in left.iter().rev().enumerate() {
        out[rank - 1 - i] = d;
    }
    for (i, &d) in right.iter().rev().enumerate() {
        let j = rank - 1 - i;
        if out[j] == d || d == 1 {
            continue;
        }
        if out[j] == 1 {
            out[j] = d;
        } else {
            return Err(BlockError::ShapeMismatch {
                operation,
                left: left.to_vec(),
                right: right.to_vec(),
            });
        }
    }
    Ok(out)
}

impl BlockMatrix {
    /// Shared kernel for elementwise binaries.
    fn zip_with(
        &self,
        other: &BlockMatrix,
        operation: &'static str,
        dtype: Dtype,
        f: impl Fn(f64, f64) -> f64,
    ) -> BlockResult<BlockMatrix> {
        let shape = broadcast_shape(self.shape(), other.shape(), operation)?;
        let mismatch = || BlockError::ShapeMismatch {
            operation,
            left: self.shape().to_vec(),
            right: other.shape().to_vec(),
        };
        let lhs = self.data.broadcast(IxDyn(&shape)).ok_or_else(mismatch)?;
        let rhs = other.data.broadcast(IxDyn(&shape)).ok_or_else(mismatch)?;
        let data = Zip::from(&lhs).and(&rhs).map_collect(|&x, &y| f(x, y));
        Ok(BlockMatrix::from_parts(data, dtype, self.g, self.n))
    }

    /// Elementwise sum. Two indicator operands widen to `UInt8`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::{BlockMatrix, Dtype};
    ///
    /// let i = BlockMatrix::identity(2, 2, 1);
    /// let s = i.add(&i).unwrap();
    /// assert_eq!(s[&[0, 0]], 2.0);
    /// assert_eq!(s.dtype(), Dtype::UInt8);
    /// ```
    pub fn add(&self, other: &BlockMatrix) -> BlockResult<BlockMatrix> {
        self.zip_with(other, "add", self.dtype.widen(other.dtype), |x, y| x + y)
    }

    /// Elementwise difference `self − other`. Widens like [`BlockMatrix::add`].
    pub fn sub(&self, other: &BlockMatrix) -> BlockResult<BlockMatrix> {
        self.zip_with(other, "sub", self.dtype.widen(other.dtype), |x, y| x - y)
    }

    /// Reversed elementwise difference `other − self`.
    pub fn sub_from(&self, other: &BlockMatrix) -> BlockResult<BlockMatrix> {
        self.zip_with(other, "sub_from", self.dtype.widen(other.dtype), |x, y| {
            y - x
        })
    }

    /// Elementwise product.
    ///
    /// Unlike the additive operations, two indicator operands stay `Bool`:
    /// products of 0/1 entries are themselves 0/1, so no widening applies.
    pub fn mul(&self, other: &BlockMatrix) -> BlockResult<BlockMatrix> {
        self.zip_with(other, "mul", self.dtype.promote(other.dtype), |x, y| x * y)
    }

    /// Elementwise quotient `self ⊘ other` with the safe-divide convention:
    /// positions where `other` is 0 yield 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::BlockMatrix;
    ///
    /// let va = BlockMatrix::from_vec(vec![3.0, 5.0], &[2], 2, 1).unwrap();
    /// let x = BlockMatrix::from_vec(vec![6.0, 0.0], &[2], 2, 1).unwrap();
    /// let v = va.div(&x).unwrap();
    /// assert_eq!(v[&[0]], 0.5);
    /// assert_eq!(v[&[1]], 0.0); // zero output, zero share
    /// ```
    pub fn div(&self, other: &BlockMatrix) -> BlockResult<BlockMatrix> {
        self.zip_with(other, "div", Dtype::Float64, safe_div)
    }

    /// Reversed elementwise quotient `other ⊘ self`, safe on `self`'s zeros.
    pub fn div_from(&self, other: &BlockMatrix) -> BlockResult<BlockMatrix> {
        self.zip_with(other, "div_from", Dtype::Float64, |x, y| safe_div(y, x))
    }

    /// Add a scalar to every element.
    pub fn add_scalar(&self, scalar: f64) -> BlockMatrix {
        BlockMatrix::from_parts(
            self.data.mapv(|x| x + scalar),
            Dtype::Float64,
            self.g,
            self.n,
        )
    }

    /// Subtract a scalar from every element.
    pub fn sub_scalar(&self, scalar: f64) -> BlockMatrix {
        BlockMatrix::from_parts(
            self.data.mapv(|x| x - scalar),
            Dtype::Float64,
            self.g,
            self.n,
        )
    }

    /// `scalar − self` at every element.
    pub fn sub_from_scalar(&self, scalar: f64) -> BlockMatrix {
        BlockMatrix::from_parts(
            self.data.mapv(|x| scalar - x),
            Dtype::Float64,
            self.g,
            self.n,
        )
    }

    /// Multiply every element by a scalar.
    pub fn mul_scalar(&self, scalar: f64) -> BlockMatrix {
        BlockMatrix::from_parts(
            self.data.mapv(|x| x * scalar),
            Dtype::Float64,
            self.g,
            self.n,
        )
    }

    /// Divide every element by a scalar, safe on a zero scalar.
    pub fn div_scalar(&self, scalar: f64) -> BlockMatrix {
        BlockMatrix::from_parts(
            self.data.mapv(|x| safe_div(x, scalar)),
            Dtype::Float64,
            self.g,
            self.n,
        )
    }

    /// `scalar ⊘ self` at every element, safe on `self`'s zeros.
    ///
    /// `x.div_from_scalar(1.0)` is the safe reciprocal used when scaling
    /// intermediate flows by output.
    pub fn div_from_scalar(&self, scalar: f64) -> BlockMatrix {
        BlockMatrix::from_parts(
            self.data.mapv(|x| safe_div(scalar, x)),
            Dtype::Float64,
            self.g,
            self.n,
        )
    }

    /// Matrix product. Handles matrix×matrix, matrix×vector, vector×matrix
    /// and vector×vector (inner product); the result carries the left
    /// operand's `(g, n)` tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::BlockMatrix;
    ///
    /// let z = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2], 2, 1).unwrap();
    /// let i = BlockMatrix::identity(2, 2, 1);
    /// let p = z.matmul(&i).unwrap();
    /// assert_eq!(p[&[1, 0]], 3.0);
    /// ```
    pub fn matmul(&self, other: &BlockMatrix) -> BlockResult<BlockMatrix> {
        let mismatch = || BlockError::ShapeMismatch {
            operation: "matmul",
            left: self.shape().to_vec(),
            right: other.shape().to_vec(),
        };
        let inner_left = *self.shape().last().unwrap_or(&0);
        let inner_right = other.shape()[0];
        if inner_left != inner_right {
            return Err(mismatch());
        }

        let dtype = self.dtype.widen(other.dtype);
        let data = match (self.rank(), other.rank()) {
            (2, 2) => {
                let a = self.to_matrix("matmul")?;
                let b = other.to_matrix("matmul")?;
                a.dot(&b).into_dyn()
            }
            (2, 1) => {
                let a = self.to_matrix("matmul")?;
                let b = other.to_vector("matmul")?;
                a.dot(&b).into_dyn()
            }
            (1, 2) => {
                let a = self.to_vector("matmul")?;
                let b = other.to_matrix("matmul")?;
                a.dot(&b).into_dyn()
            }
            (1, 1) => {
                // Inner product, kept rank 1 so the result stays a valid
                // BlockMatrix.
                let a = self.to_vector("matmul")?;
                let b = other.to_vector("matmul")?;
                scirs2_core::ndarray_ext::Array1::from_vec(vec![a.dot(&b)]).into_dyn()
            }
            _ => return Err(mismatch()),
        };
        Ok(BlockMatrix::from_parts(data, dtype, self.g, self.n))
    }
}
