//! Container parser
//!
//! Zero-copy parsing that returns views into the original byte buffer.

mod rehydrate;
mod structure;

use crate::error::{Error, Result};
use crate::types::{HEADER_SIZE, Header, KEYS_FIELD, KeyShape, MAGIC, ValueView};
use serde_json::Value as JsonValue;

/// Validate the fixed header and return it
pub fn read_header(bytes: &[u8]) -> Result<Header> {
    if bytes.len() < MAGIC.len() || &bytes[..MAGIC.len()] != MAGIC {
        return Err(Error::format("invalid magic bytes"));
    }
    if bytes.len() < HEADER_SIZE {
        return Err(Error::format("truncated header"));
    }

    let structure_offset = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let start = structure_offset as usize;
    if start < HEADER_SIZE || start > bytes.len() {
        return Err(Error::format(format!(
            "structural region offset {} outside buffer of {} bytes",
            structure_offset,
            bytes.len()
        )));
    }

    Ok(Header { structure_offset })
}

/// Decode a container
///
/// Returns a ValueView whose arrays borrow from the input bytes.
/// The bytes must remain valid for the lifetime of the returned ValueView;
/// nothing is copied out of the bulk region.
pub fn decode(bytes: &[u8]) -> Result<ValueView<'_>> {
    let header = read_header(bytes)?;
    let start = header.structure_offset as usize;

    let mut json: JsonValue = serde_json::from_slice(&bytes[start..])?;
    let keys = match &mut json {
        JsonValue::Object(root) => root.shift_remove(KEYS_FIELD),
        _ => None,
    };

    let mut root = structure::to_view(json);
    let Some(keys) = keys else {
        log::debug!("decoded container without arrays: {} bytes", bytes.len());
        return Ok(root);
    };

    let KeyShape::Branch(keys) = KeyShape::from_json(&keys)? else {
        return Err(Error::format("key-shape tree root must be an object"));
    };
    let restored = rehydrate::rehydrate(&mut root, &keys, bytes, start)?;

    log::debug!(
        "decoded container: {} arrays over {} bulk bytes, {} structural bytes",
        restored,
        start - HEADER_SIZE,
        bytes.len() - start
    );
    Ok(root)
}
