//! Numeric array leaves - owned and view variants

use super::{DType, Element};
use crate::error::{Error, Result, ViewError};

/// Owned numeric array (for building/encoding)
///
/// Holds little-endian element bytes; the length is always a whole number of
/// elements of `dtype`.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    dtype: DType,
    data: Vec<u8>,
}

impl Array {
    /// Copy typed values into a new array
    pub fn from_slice<T: Element>(values: &[T]) -> Self {
        let data = if cfg!(target_endian = "little") {
            bytemuck::cast_slice(values).to_vec()
        } else {
            let mut data = Vec::with_capacity(std::mem::size_of_val(values));
            for value in values {
                data.extend_from_slice(bytemuck::bytes_of(&value.to_le()));
            }
            data
        };
        Self {
            dtype: T::DTYPE,
            data,
        }
    }

    /// Wrap little-endian element bytes
    pub fn from_bytes(dtype: DType, data: Vec<u8>) -> Result<Self> {
        if data.len() % dtype.element_size() != 0 {
            return Err(Error::LengthMismatch {
                dtype,
                len: data.len(),
            });
        }
        Ok(Self { dtype, data })
    }

    /// Wrap element bytes whose type is only known by its registry tag
    pub fn from_raw(tag: u8, data: Vec<u8>) -> Result<Self> {
        let dtype = DType::from_u8(tag).ok_or(Error::UnsupportedElementType(tag))?;
        Self::from_bytes(dtype, data)
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len() / self.dtype.element_size()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy out the elements as `T`
    pub fn to_vec<T: Element>(&self) -> std::result::Result<Vec<T>, ViewError> {
        read_elements(self.dtype, &self.data)
    }
}

impl<T: Element> From<Vec<T>> for Array {
    fn from(values: Vec<T>) -> Self {
        Array::from_slice(&values)
    }
}

impl<T: Element> From<&[T]> for Array {
    fn from(values: &[T]) -> Self {
        Array::from_slice(values)
    }
}

/// View into a numeric array stored in a container (zero-copy)
///
/// Borrows the decoded buffer; it cannot outlive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayView<'a> {
    pub dtype: DType,
    /// Byte offset of `data` from the start of the container
    pub offset: usize,
    pub data: &'a [u8],
}

impl<'a> ArrayView<'a> {
    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len() / self.dtype.element_size()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reinterpret the bytes as a typed slice without copying.
    ///
    /// Requires the buffer to be aligned for `T`; offsets inside a container
    /// are 4-byte aligned, so any buffer whose start is 4-byte aligned works.
    pub fn as_slice<T: Element>(&self) -> std::result::Result<&'a [T], ViewError> {
        check_dtype::<T>(self.dtype)?;
        if cfg!(target_endian = "big") {
            return Err(ViewError::ByteOrder);
        }
        if self.data.is_empty() {
            return Ok(&[]);
        }
        bytemuck::try_cast_slice(self.data).map_err(|_| ViewError::Misaligned)
    }

    /// Copy out the elements as `T`, regardless of alignment
    pub fn to_vec<T: Element>(&self) -> std::result::Result<Vec<T>, ViewError> {
        read_elements(self.dtype, self.data)
    }

    /// Convert to owned Array
    pub fn to_owned(&self) -> Array {
        Array {
            dtype: self.dtype,
            data: self.data.to_vec(),
        }
    }
}

fn check_dtype<T: Element>(actual: DType) -> std::result::Result<(), ViewError> {
    if T::DTYPE != actual {
        return Err(ViewError::DTypeMismatch {
            expected: T::DTYPE,
            actual,
        });
    }
    Ok(())
}

fn read_elements<T: Element>(dtype: DType, data: &[u8]) -> std::result::Result<Vec<T>, ViewError> {
    check_dtype::<T>(dtype)?;
    Ok(data
        .chunks_exact(dtype.element_size())
        .map(|chunk| bytemuck::pod_read_unaligned::<T>(chunk).to_le())
        .collect())
}
