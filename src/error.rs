//! Error types for the container format

use crate::types::{DType, ValueKind};
use std::borrow::Cow;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single encode or decode call.
///
/// Every error is terminal: a failed decode yields no structure at all.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad magic, truncated header, bad region offset, unparsable structural
    /// region or a malformed key-shape tree / descriptor
    #[error("invalid container: {0}")]
    Format(Cow<'static, str>),

    /// Element type tag not present in the type registry
    #[error("unsupported element type tag: {0}")]
    UnsupportedElementType(u8),

    /// Descriptor range does not fit inside the bulk region
    #[error("array range {offset}..{offset}+{len} exceeds bulk region ending at {limit}")]
    OutOfBounds { offset: u64, len: u64, limit: u64 },

    /// Byte length is not a whole number of elements
    #[error("{len} bytes is not a whole number of {} elements", .dtype.name())]
    LengthMismatch { dtype: DType, len: usize },

    /// The root object already uses the reserved key-shape field
    #[error("root object already contains the reserved key `{0}`")]
    ReservedKey(&'static str),

    /// Arrays can only be embedded when the root is an object
    #[error("cannot embed arrays under a root of kind {0:?}")]
    InvalidRoot(ValueKind),

    /// Bulk region does not fit the 32-bit header offset
    #[error("container of {0} bytes exceeds the 32-bit offset range")]
    TooLarge(u64),

    /// Containers nest deeper than a structural region may
    #[error("structure nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn format(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Format(message.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Format(Cow::Owned(format!("structural region: {}", e)))
    }
}

/// Failure to reinterpret an array view as a typed slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("dtype mismatch: expected {expected:?}, got {actual:?}")]
    DTypeMismatch { expected: DType, actual: DType },
    /// Buffer start is not aligned for the element type
    #[error("array data is not aligned for its element type")]
    Misaligned,
    /// Zero-copy typed slices need a little-endian host
    #[error("zero-copy typed slices require a little-endian host")]
    ByteOrder,
}

/// Error for accessing values by path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Path not found in the structure
    #[error("path not found: {path}")]
    NotFound { path: String },
    /// Value at path has wrong type
    #[error("type mismatch at '{path}': expected {expected}, got {actual:?}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        actual: ValueKind,
    },
}
