//! Serialization of structures into containers
//!
//! Encoding is two passes over the input, which is never modified:
//! the walker lists the arrays and builds the key-shape tree, then the
//! structural region is rendered as a copy with descriptors in place of
//! arrays. Arrays precede the structural region, so every offset is known
//! before the first byte is written.

mod layout;
mod structure;
mod walker;

pub use layout::{Layout, Slot};

use crate::error::{Error, Result};
use crate::types::{ALIGNMENT, Array, HEADER_SIZE, Header, KEYS_FIELD, KeyShape, Value};
use serde_json::Value as JsonValue;
use std::io::Write;

/// Padding source for the gaps between arrays
const PADDING: [u8; ALIGNMENT] = [0; ALIGNMENT];

/// Everything needed to emit a container
struct Prepared<'a> {
    layout: Layout,
    arrays: Vec<&'a Array>,
    structure: Vec<u8>,
}

impl Prepared<'_> {
    fn total_len(&self) -> usize {
        self.layout.structure_offset + self.structure.len()
    }
}

/// Compute the bulk layout `value` would be encoded with
pub fn plan(value: &Value) -> Result<Layout> {
    let walk = walker::walk(value);
    check_root(value, walk.extractions.is_empty())?;
    layout::plan(&walk.extractions)
}

fn prepare(value: &Value) -> Result<Prepared<'_>> {
    let walker::Walk { extractions, keys } = walker::walk(value);
    check_root(value, extractions.is_empty())?;
    let layout = layout::plan(&extractions)?;

    let mut json = structure::render(value, &mut layout.slots.iter())?;
    if let JsonValue::Object(root) = &mut json {
        if !keys.is_empty() {
            root.insert(KEYS_FIELD.to_string(), KeyShape::Branch(keys).to_json());
        }
    }
    let structure = serde_json::to_vec(&json)?;

    Ok(Prepared {
        layout,
        arrays: extractions.into_iter().map(|e| e.array).collect(),
        structure,
    })
}

fn check_root(value: &Value, no_arrays: bool) -> Result<()> {
    match value {
        Value::Object(entries) if entries.contains_key(KEYS_FIELD) => {
            Err(Error::ReservedKey(KEYS_FIELD))
        }
        Value::Object(_) => Ok(()),
        _ if no_arrays => Ok(()),
        other => Err(Error::InvalidRoot(other.kind())),
    }
}

/// Write a container for `value` to a writer
pub fn write<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    let prepared = prepare(value)?;
    emit(writer, &prepared)
}

/// Encode `value` into a new container buffer
pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    let prepared = prepare(value)?;
    let mut buf = Vec::with_capacity(prepared.total_len());
    emit(&mut buf, &prepared)?;
    Ok(buf)
}

fn emit<W: Write>(writer: &mut W, prepared: &Prepared<'_>) -> Result<()> {
    let layout = &prepared.layout;
    let structure_offset = u32::try_from(layout.structure_offset)
        .map_err(|_| Error::TooLarge(layout.structure_offset as u64))?;

    writer.write_all(&Header { structure_offset }.to_bytes())?;

    let mut position = HEADER_SIZE;
    for (slot, array) in layout.slots.iter().zip(&prepared.arrays) {
        writer.write_all(&PADDING[..slot.offset - position])?;
        writer.write_all(array.as_bytes())?;
        position = slot.end();
    }
    writer.write_all(&PADDING[..layout.structure_offset - position])?;

    writer.write_all(&prepared.structure)?;

    log::debug!(
        "encoded {} arrays: {} bulk bytes, {} structural bytes",
        layout.slots.len(),
        layout.bulk_len(),
        prepared.structure.len()
    );
    Ok(())
}
