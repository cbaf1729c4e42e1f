//! ndarray integration for container arrays
//!
//! Zero-copy ndarray views over decoded arrays, and construction of arrays
//! from contiguous ndarray data.
//!
//! Enable with the `ndarray` feature flag.

use crate::error::ViewError;
use crate::types::{Array, ArrayView, Element};
use ndarray::{Array1, ArrayBase, ArrayView1, ArrayView2, Data, Dimension};
use thiserror::Error;

/// Error type for ndarray conversions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NdarrayError {
    #[error(transparent)]
    View(#[from] ViewError),
    /// Element count is not a whole number of rows
    #[error("{len} elements do not split into rows of {row_len}")]
    ShapeMismatch { len: usize, row_len: usize },
    /// Array is not in standard (contiguous row-major) layout
    #[error("array is not contiguous; call .as_standard_layout() first")]
    NotContiguous,
}

impl Array {
    /// Copy a contiguous ndarray of any dimension into a flat array
    pub fn from_ndarray<T, S, D>(arr: &ArrayBase<S, D>) -> Result<Self, NdarrayError>
    where
        T: Element,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let slice = arr.as_slice().ok_or(NdarrayError::NotContiguous)?;
        Ok(Array::from_slice(slice))
    }
}

impl<'a> ArrayView<'a> {
    /// Zero-copy 1-D view; same alignment rules as [`ArrayView::as_slice`]
    pub fn as_ndarray<T: Element>(&self) -> Result<ArrayView1<'a, T>, NdarrayError> {
        Ok(ArrayView1::from(self.as_slice::<T>()?))
    }

    /// Zero-copy 2-D view of `row_len`-wide rows, e.g. xyz vertex positions
    pub fn as_rows<T: Element>(&self, row_len: usize) -> Result<ArrayView2<'a, T>, NdarrayError> {
        let slice = self.as_slice::<T>()?;
        let mismatch = NdarrayError::ShapeMismatch {
            len: slice.len(),
            row_len,
        };
        if row_len == 0 || slice.len() % row_len != 0 {
            return Err(mismatch);
        }
        ArrayView2::from_shape((slice.len() / row_len, row_len), slice).map_err(|_| mismatch)
    }

    /// Copy into an owned 1-D ndarray, regardless of alignment
    pub fn to_ndarray<T: Element>(&self) -> Result<Array1<T>, NdarrayError> {
        Ok(Array1::from_vec(self.to_vec::<T>()?))
    }
}
