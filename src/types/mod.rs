//! Core types for the container format

mod array;
mod dtype;
mod header;
mod key_shape;
mod value;

pub use array::{Array, ArrayView};
pub use dtype::{DType, Element};
pub use header::{
    ALIGNMENT, FILE_EXTENSION, HEADER_SIZE, Header, KEYS_FIELD, MAGIC, MAX_NESTING, align_up,
};
pub use key_shape::KeyShape;
pub use value::{Value, ValueKind, ValueView};
