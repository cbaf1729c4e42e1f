//! bare-container - Binary container for nested structures with zero-copy numeric arrays
//!
//! A container carries an arbitrary keyed structure whose leaves are scalars
//! or numeric arrays (float32, int8/16/32, uint8/16/32). Arrays are written as
//! raw little-endian byte runs; everything else travels as JSON so it stays
//! easy to inspect. On decode the arrays come back as views borrowing the
//! input buffer, so no bulk data is copied.
//!
//! # Layout
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 4 | Magic bytes `BARE` |
//! | 4 | 4 | Big-endian u32: byte offset of the structural region |
//! | 8 | variable | Arrays, each starting on a 4-byte boundary |
//! | offset | variable | JSON structure, arrays replaced by `[type, offset, count]` |
//!
//! The JSON root also carries a `__keys` tree marking which paths hold
//! descriptors; it is removed again on decode.
//!
//! # Example
//!
//! ```rust
//! use bare_container::{Value, decode, encode};
//!
//! let mesh = Value::object([
//!     ("name", Value::from("quad")),
//!     ("geometry", Value::object([
//!         ("position", Value::from(vec![0.0f32, 0.0, 1.0, 0.0, 1.0, 1.0])),
//!         ("index", Value::from(vec![0u16, 1, 2])),
//!     ])),
//! ]);
//!
//! let bytes = encode(&mesh).unwrap();
//! let view = decode(&bytes).unwrap();
//!
//! let index = view.array_at("geometry/index").unwrap();
//! assert_eq!(index.to_vec::<u16>().unwrap(), vec![0, 1, 2]);
//! ```

pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use error::{AccessError, Error, Result, ViewError};
pub use parser::{decode, read_header};
pub use types::{
    ALIGNMENT, Array, ArrayView, DType, Element, FILE_EXTENSION, HEADER_SIZE, Header, KEYS_FIELD,
    KeyShape, MAGIC, MAX_NESTING, Value, ValueKind, ValueView,
};
pub use writer::to_bytes as encode;

#[cfg(feature = "ndarray")]
pub use ndarray_ext::NdarrayError;
