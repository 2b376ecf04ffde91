//! Vector arrays passed into and returned from adapters.

use nalgebra::{DMatrix, Scalar};

use crate::{AdapterError, NativeVector};

/// An ordered list of native vectors of equal dimension.
///
/// Adapters only read from it.
#[derive(Debug, Clone)]
pub struct ListVectorArray<V> {
    dim: usize,
    vectors: Vec<V>,
}

impl<V: NativeVector> ListVectorArray<V> {
    /// Create an array of vectors of dimension `dim`.
    ///
    /// Fails with [`AdapterError::DimensionMismatch`] on the first vector of
    /// another dimension.
    pub fn new(dim: usize, vectors: Vec<V>) -> Result<Self, AdapterError> {
        if let Some(bad) = vectors.iter().find(|v| v.dim() != dim) {
            return Err(AdapterError::DimensionMismatch {
                expected: dim,
                found: bad.dim(),
            });
        }
        Ok(Self { dim, vectors })
    }

    /// Dimension shared by all vectors.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&V> {
        self.vectors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.vectors.iter()
    }

    /// The whole array (`None`) or the vectors at `indices`, in the given
    /// order, duplicates kept.
    pub fn select(&self, indices: Option<&[usize]>) -> Result<Vec<&V>, AdapterError> {
        match indices {
            None => Ok(self.vectors.iter().collect()),
            Some(indices) => indices
                .iter()
                .map(|&index| {
                    self.vectors.get(index).ok_or(AdapterError::IndexOutOfRange {
                        index,
                        len: self.vectors.len(),
                    })
                })
                .collect(),
        }
    }
}

/// A dense array of `len` vectors of dimension `dim`, stored as a
/// `len x dim` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericVectorArray<S: Scalar> {
    data: DMatrix<S>,
}

impl<S: Scalar> NumericVectorArray<S> {
    /// One-dimensional vectors, one per value. Takes ownership of the buffer.
    pub fn from_column(values: Vec<S>) -> Self {
        let len = values.len();
        Self {
            data: DMatrix::from_vec(len, 1, values),
        }
    }

    pub fn from_matrix(data: DMatrix<S>) -> Self {
        Self { data }
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Dimension of each vector.
    pub fn dim(&self) -> usize {
        self.data.ncols()
    }

    pub fn as_matrix(&self) -> &DMatrix<S> {
        &self.data
    }

    pub fn into_matrix(self) -> DMatrix<S> {
        self.data
    }

    /// Entries in column-major order.
    pub fn values(&self) -> &[S] {
        self.data.as_slice()
    }
}
