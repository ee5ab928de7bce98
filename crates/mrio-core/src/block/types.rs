//! Block-matrix type definition and basic operations
//!
//! This module defines the core [`BlockMatrix`] type together with its
//! constructors and accessors. The operator algebra lives in the sibling
//! modules (`arith`, `linalg`, `reduce`, `subset`, `blockdiag`).

use scirs2_core::ndarray_ext::{Array, Array1, Array2, Ix1, Ix2, IxDyn};

use crate::error::{BlockError, BlockResult};

/// Logical numeric kind of a [`BlockMatrix`].
///
/// Entries are always stored as `f64`; the kind records whether a matrix is a
/// 0/1 indicator (identity blocks, aggregators) or general numeric data, so
/// that indicator arithmetic can widen instead of wrapping back into a truth
/// value. Promotion always happens on a freshly allocated result, never by
/// mutating an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    /// 0/1 indicator entries.
    Bool,
    /// Small unsigned counts, the widened form of indicator addition.
    UInt8,
    /// General floating-point entries.
    Float64,
}

impl Dtype {
    /// True for the 0/1 indicator kind.
    pub fn is_indicator(self) -> bool {
        matches!(self, Dtype::Bool)
    }

    /// Ordinary promotion: the wider of the two kinds wins.
    pub(crate) fn promote(self, other: Dtype) -> Dtype {
        use Dtype::*;
        match (self, other) {
            (Float64, _) | (_, Float64) => Float64,
            (UInt8, _) | (_, UInt8) => UInt8,
            (Bool, Bool) => Bool,
        }
    }

    /// Promotion for additive operations: two indicators widen to `UInt8`
    /// so 1+1 cannot wrap back into a truth value.
    pub(crate) fn widen(self, other: Dtype) -> Dtype {
        if self == Dtype::Bool && other == Dtype::Bool {
            Dtype::UInt8
        } else {
            self.promote(other)
        }
    }
}

/// A dense vector or matrix tagged with its region-block structure.
///
/// An MRIO table is partitioned into `g` region blocks of `n` sectors each.
/// `BlockMatrix` carries those two tags through every operation, so that
/// block-aware index arithmetic (subsetting, block-diagonal reshaping,
/// chunked aggregation) stays available on derived quantities without
/// re-deriving the partition from raw shapes.
///
/// All operations treat their operands as immutable and return a new
/// instance; the result adopts the receiver's `(g, n)` tags.
///
/// # Examples
///
/// ```
/// use mrio_core::BlockMatrix;
///
/// // A 2-region, 1-sector output vector.
/// let x = BlockMatrix::from_vec(vec![10.0, 20.0], &[2], 2, 1).unwrap();
/// assert_eq!(x.shape(), &[2]);
/// assert_eq!(x.g(), 2);
/// assert_eq!(x.n(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BlockMatrix {
    /// Underlying dense storage, rank 1 or 2.
    pub(crate) data: Array<f64, IxDyn>,
    pub(crate) dtype: Dtype,
    pub(crate) g: usize,
    pub(crate) n: usize,
}

impl BlockMatrix {
    /// Wrap an existing array with explicit block tags.
    ///
    /// The logical kind is `Float64`. Fails if the array is not rank 1 or 2.
    pub fn from_array(data: Array<f64, IxDyn>, g: usize, n: usize) -> BlockResult<Self> {
        if data.ndim() == 0 || data.ndim() > 2 {
            return Err(BlockError::RankMismatch {
                operation: "from_array",
                expected: 2,
                actual: data.ndim(),
            });
        }
        Ok(Self {
            data,
            dtype: Dtype::Float64,
            g,
            n,
        })
    }

    /// Build from a flat vector in row-major order with the given shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::BlockMatrix;
    ///
    /// let z = BlockMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2], 2, 1).unwrap();
    /// assert_eq!(z[&[1, 0]], 3.0);
    /// ```
    pub fn from_vec(vec: Vec<f64>, shape: &[usize], g: usize, n: usize) -> BlockResult<Self> {
        if shape.is_empty() || shape.len() > 2 {
            return Err(BlockError::RankMismatch {
                operation: "from_vec",
                expected: 2,
                actual: shape.len(),
            });
        }
        let total: usize = shape.iter().product();
        if vec.len() != total {
            return Err(BlockError::ShapeMismatch {
                operation: "from_vec",
                left: shape.to_vec(),
                right: vec![vec.len()],
            });
        }
        let data = Array::from_shape_vec(IxDyn(shape), vec).map_err(|_| {
            BlockError::ShapeMismatch {
                operation: "from_vec",
                left: shape.to_vec(),
                right: vec![total],
            }
        })?;
        Ok(Self {
            data,
            dtype: Dtype::Float64,
            g,
            n,
        })
    }

    /// A zero-filled vector or matrix.
    ///
    /// # Panics
    ///
    /// Panics if `shape` is not rank 1 or 2.
    pub fn zeros(shape: &[usize], g: usize, n: usize) -> Self {
        assert!(
            matches!(shape.len(), 1 | 2),
            "BlockMatrix shape must be rank 1 or 2, got {:?}",
            shape
        );
        Self {
            data: Array::zeros(IxDyn(shape)),
            dtype: Dtype::Float64,
            g,
            n,
        }
    }

    /// A one-filled vector or matrix of general numeric kind.
    ///
    /// # Panics
    ///
    /// Panics if `shape` is not rank 1 or 2.
    pub fn ones(shape: &[usize], g: usize, n: usize) -> Self {
        assert!(
            matches!(shape.len(), 1 | 2),
            "BlockMatrix shape must be rank 1 or 2, got {:?}",
            shape
        );
        Self {
            data: Array::ones(IxDyn(shape)),
            dtype: Dtype::Float64,
            g,
            n,
        }
    }

    /// The `dim`×`dim` identity, tagged as a 0/1 indicator.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrio_core::{BlockMatrix, Dtype};
    ///
    /// let i = BlockMatrix::identity(3, 3, 1);
    /// assert_eq!(i[&[1, 1]], 1.0);
    /// assert_eq!(i[&[1, 2]], 0.0);
    /// assert_eq!(i.dtype(), Dtype::Bool);
    /// ```
    pub fn identity(dim: usize, g: usize, n: usize) -> Self {
        let mut data = Array::zeros(IxDyn(&[dim, dim]));
        for k in 0..dim {
            data[[k, k]] = 1.0;
        }
        Self {
            data,
            dtype: Dtype::Bool,
            g,
            n,
        }
    }

    /// A one-filled vector or matrix tagged as a 0/1 indicator.
    ///
    /// Used for summation vectors and block-sum aggregators.
    ///
    /// # Panics
    ///
    /// Panics if `shape` is not rank 1 or 2.
    pub fn indicator_ones(shape: &[usize], g: usize, n: usize) -> Self {
        assert!(
            matches!(shape.len(), 1 | 2),
            "BlockMatrix shape must be rank 1 or 2, got {:?}",
            shape
        );
        Self {
            data: Array::ones(IxDyn(shape)),
            dtype: Dtype::Bool,
            g,
            n,
        }
    }

    /// Internal constructor for operation results.
    pub(crate) fn from_parts(data: Array<f64, IxDyn>, dtype: Dtype, g: usize, n: usize) -> Self {
        Self { data, dtype, g, n }
    }

    /// Shape of the underlying array.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Rank (1 for vectors, 2 for matrices).
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the matrix has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of region blocks.
    pub fn g(&self) -> usize {
        self.g
    }

    /// Sector-block size.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Logical numeric kind.
    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    /// True for a rank-2 matrix with equal dimensions.
    pub fn is_square(&self) -> bool {
        self.rank() == 2 && self.shape()[0] == self.shape()[1]
    }

    /// Immutable reference to the underlying array.
    pub fn as_array(&self) -> &Array<f64, IxDyn> {
        &self.data
    }

    /// All elements as a flat vector in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.iter().cloned().collect()
    }

    /// The effective block length along an axis: `n` when the axis tiles
    /// evenly into sector blocks, otherwise 1 (a region-granular axis, e.g.
    /// the G columns of an aggregated final-demand matrix).
    pub(crate) fn block_len(&self, axis_len: usize) -> usize {
        if self.n != 0 && axis_len % self.n == 0 {
            self.n
        } else {
            1
        }
    }

    /// View as a rank-2 array, failing with rank context otherwise.
    pub(crate) fn to_matrix(&self, operation: &'static str) -> BlockResult<Array2<f64>> {
        self.data
            .clone()
            .into_dimensionality::<Ix2>()
            .map_err(|_| BlockError::RankMismatch {
                operation,
                expected: 2,
                actual: self.rank(),
            })
    }

    /// View as a rank-1 array, failing with rank context otherwise.
    pub(crate) fn to_vector(&self, operation: &'static str) -> BlockResult<Array1<f64>> {
        self.data
            .clone()
            .into_dimensionality::<Ix1>()
            .map_err(|_| BlockError::RankMismatch {
                operation,
                expected: 1,
                actual: self.rank(),
            })
    }
}

impl std::ops::Index<&[usize]> for BlockMatrix {
    type Output = f64;

    fn index(&self, index: &[usize]) -> &Self::Output {
        &self.data[IxDyn(index)]
    }
}
