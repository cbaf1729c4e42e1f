//! Structural region: the structure as JSON with arrays replaced by descriptors

use super::layout::Slot;
use crate::error::{Error, Result};
use crate::types::{MAX_NESTING, Value};
use serde_json::{Map, Number, Value as JsonValue};

/// Copy `value` into a JSON tree, substituting each array with the
/// `[type, offset, count]` descriptor of the next slot.
///
/// Slots must come in the same depth-first order the walker produced them.
/// Fails with [`Error::TooDeep`] past [`MAX_NESTING`] levels of containers.
pub fn render<'s>(value: &Value, slots: &mut impl Iterator<Item = &'s Slot>) -> Result<JsonValue> {
    render_at(value, slots, 0)
}

fn render_at<'s>(
    value: &Value,
    slots: &mut impl Iterator<Item = &'s Slot>,
    depth: usize,
) -> Result<JsonValue> {
    let nested = matches!(value, Value::Array(_) | Value::Object(_) | Value::List(_));
    if nested && depth >= MAX_NESTING {
        return Err(Error::TooDeep { limit: MAX_NESTING });
    }

    Ok(match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::from(*i),
        // Non-finite floats have no JSON form
        Value::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Array(array) => {
            let slot = slots
                .next()
                .ok_or_else(|| Error::format("array missing from layout"))?;
            debug_assert_eq!(slot.dtype, array.dtype());
            descriptor(slot)
        }
        Value::Object(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, child) in entries {
                map.insert(key.clone(), render_at(child, slots, depth + 1)?);
            }
            JsonValue::Object(map)
        }
        Value::List(items) => JsonValue::Array(
            items
                .iter()
                .map(|item| render_at(item, slots, depth + 1))
                .collect::<Result<Vec<_>>>()?,
        ),
    })
}

fn descriptor(slot: &Slot) -> JsonValue {
    JsonValue::Array(vec![
        JsonValue::from(slot.dtype.tag()),
        JsonValue::from(slot.offset),
        JsonValue::from(slot.count),
    ])
}
