//! Replace descriptors with zero-copy array views

use crate::error::{Error, Result};
use crate::types::{ALIGNMENT, ArrayView, DType, HEADER_SIZE, KeyShape, ValueView};
use indexmap::IndexMap;

/// Walk `root` alongside the key-shape tree and turn every descriptor at an
/// extracted path into a view over `bytes`.
///
/// `bulk_end` is the structural region offset; array data must lie in
/// `HEADER_SIZE..bulk_end`. Returns the number of arrays restored.
pub fn rehydrate<'a, 'k>(
    root: &mut ValueView<'a>,
    keys: &'k IndexMap<String, KeyShape>,
    bytes: &'a [u8],
    bulk_end: usize,
) -> Result<usize> {
    let mut restored = 0;
    let mut stack = vec![(keys, root)];

    while let Some((shape, node)) = stack.pop() {
        let mut matched = 0;
        let mut visit = |child: &mut ValueView<'a>,
                         child_shape: &'k KeyShape|
         -> Result<Option<&'k IndexMap<String, KeyShape>>> {
            matched += 1;
            match child_shape {
                KeyShape::Extracted => {
                    *child = ValueView::Array(resolve(child, bytes, bulk_end)?);
                    restored += 1;
                    Ok(None)
                }
                KeyShape::Branch(children) => Ok(Some(children)),
            }
        };

        match node {
            ValueView::Object(entries) => {
                for (key, child) in entries.iter_mut() {
                    if let Some(child_shape) = shape.get(key) {
                        if let Some(children) = visit(&mut *child, child_shape)? {
                            stack.push((children, child));
                        }
                    }
                }
            }
            ValueView::List(items) => {
                let mut wanted = Vec::with_capacity(shape.len());
                for (key, child_shape) in shape {
                    let index = list_index(key)
                        .filter(|&index| index < items.len())
                        .ok_or_else(|| {
                            Error::format(format!(
                                "key-shape tree names list index `{}` of a {}-item list",
                                key,
                                items.len()
                            ))
                        })?;
                    wanted.push((index, child_shape));
                }
                wanted.sort_unstable_by_key(|&(index, _)| index);

                let mut wanted = wanted.into_iter().peekable();
                for (index, child) in items.iter_mut().enumerate() {
                    let Some((_, child_shape)) = wanted.next_if(|&(i, _)| i == index) else {
                        continue;
                    };
                    if let Some(children) = visit(&mut *child, child_shape)? {
                        stack.push((children, child));
                    }
                }
            }
            other => {
                return Err(Error::format(format!(
                    "key-shape tree expects a container, found {:?}",
                    other.kind()
                )));
            }
        }

        if matched != shape.len() {
            return Err(Error::format(
                "key-shape tree names a key missing from the structure",
            ));
        }
    }

    Ok(restored)
}

/// Canonical decimal list position: digits only, no leading zeros
fn list_index(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if canonical { key.parse().ok() } else { None }
}

/// Build the view for one `[type, offset, count]` descriptor
fn resolve<'a>(descriptor: &ValueView<'_>, bytes: &'a [u8], bulk_end: usize) -> Result<ArrayView<'a>> {
    let ValueView::List(fields) = descriptor else {
        return Err(Error::format(format!(
            "expected a [type, offset, count] descriptor, found {:?}",
            descriptor.kind()
        )));
    };
    let [tag, offset, count] = fields.as_slice() else {
        return Err(Error::format(format!(
            "descriptor has {} fields, expected 3",
            fields.len()
        )));
    };
    let tag = descriptor_field(tag, "type")?;
    let offset = descriptor_field(offset, "offset")?;
    let count = descriptor_field(count, "count")?;

    let tag = u8::try_from(tag)
        .map_err(|_| Error::format(format!("descriptor type {} out of range", tag)))?;
    let dtype = DType::from_u8(tag).ok_or(Error::UnsupportedElementType(tag))?;

    let limit = bulk_end as u64;
    let len = count.saturating_mul(dtype.element_size() as u64);
    let in_bounds = offset >= HEADER_SIZE as u64
        && offset.checked_add(len).is_some_and(|end| end <= limit);
    if !in_bounds {
        return Err(Error::OutOfBounds { offset, len, limit });
    }
    if offset % ALIGNMENT as u64 != 0 {
        return Err(Error::format(format!(
            "descriptor offset {} is not {}-byte aligned",
            offset, ALIGNMENT
        )));
    }

    let start = offset as usize;
    let end = start + len as usize;
    log::trace!("restoring {} x {} at {}", count, dtype.name(), start);
    Ok(ArrayView {
        dtype,
        offset: start,
        data: &bytes[start..end],
    })
}

fn descriptor_field(value: &ValueView<'_>, name: &str) -> Result<u64> {
    match value {
        ValueView::Int(i) if *i >= 0 => Ok(*i as u64),
        _ => Err(Error::format(format!(
            "descriptor {} must be a non-negative integer",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::structure::to_view;
    use serde_json::json;

    fn shape(json: serde_json::Value) -> IndexMap<String, KeyShape> {
        match KeyShape::from_json(&json).unwrap() {
            KeyShape::Branch(children) => children,
            KeyShape::Extracted => panic!("expected branch"),
        }
    }

    /// Header + one float32 array of 4 elements at offset 8
    fn buffer() -> Vec<u8> {
        let mut bytes = vec![0u8; 8];
        for v in [0.0f32, 0.25, 0.5, 0.75] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn restores_nested_descriptor() {
        let bytes = buffer();
        let mut root = to_view(json!({"a": "x", "b": {"c": [1, 8, 4]}}));
        let keys = shape(json!({"b": {"c": 1}}));

        let restored = rehydrate(&mut root, &keys, &bytes, 24).unwrap();
        assert_eq!(restored, 1);
        let view = root.array_at("b/c").unwrap();
        assert_eq!(view.dtype, DType::F32);
        assert_eq!(view.offset, 8);
        assert_eq!(view.to_vec::<f32>().unwrap(), vec![0.0, 0.25, 0.5, 0.75]);
        assert!(std::ptr::eq(view.data.as_ptr(), bytes[8..].as_ptr()));
        assert_eq!(root.get("a").unwrap().as_str(), Some("x"));
    }

    #[test]
    fn restores_inside_lists() {
        let bytes = buffer();
        let mut root = to_view(json!({"children": [{"name": "a"}, {"pos": [5, 8, 16]}]}));
        let keys = shape(json!({"children": {"1": {"pos": 1}}}));

        rehydrate(&mut root, &keys, &bytes, 24).unwrap();
        assert_eq!(root.array_at("children/1/pos").unwrap().len(), 16);
        assert!(root.get("children/0/name").is_some());
    }

    #[test]
    fn range_past_bulk_region_is_out_of_bounds() {
        let bytes = buffer();
        let mut root = to_view(json!({"c": [1, 8, 5]}));
        let err = rehydrate(&mut root, &shape(json!({"c": 1})), &bytes, 24).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfBounds {
                offset: 8,
                len: 20,
                limit: 24
            }
        ));
    }

    #[test]
    fn offset_inside_header_is_out_of_bounds() {
        let bytes = buffer();
        let mut root = to_view(json!({"c": [5, 4, 1]}));
        let err = rehydrate(&mut root, &shape(json!({"c": 1})), &bytes, 24).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { offset: 4, .. }));
    }

    #[test]
    fn huge_count_does_not_overflow() {
        let bytes = buffer();
        let mut root = to_view(json!({"c": [4, 8, i64::MAX]}));
        let err = rehydrate(&mut root, &shape(json!({"c": 1})), &bytes, 24).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }

    #[test]
    fn unaligned_offset_is_rejected() {
        let bytes = buffer();
        let mut root = to_view(json!({"c": [5, 9, 1]}));
        let err = rehydrate(&mut root, &shape(json!({"c": 1})), &bytes, 24).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let bytes = buffer();
        let mut root = to_view(json!({"c": [9, 8, 1]}));
        let err = rehydrate(&mut root, &shape(json!({"c": 1})), &bytes, 24).unwrap_err();
        assert!(matches!(err, Error::UnsupportedElementType(9)));
    }

    #[test]
    fn malformed_descriptors_are_format_errors() {
        let bytes = buffer();
        for bad in [
            json!({"c": "text"}),
            json!({"c": [1, 8]}),
            json!({"c": [1, 8, 4, 0]}),
            json!({"c": [1, -8, 4]}),
            json!({"c": [1, 8.5, 4]}),
            json!({"c": {"type": 1, "ofs": 8, "len": 4}}),
        ] {
            let mut root = to_view(bad.clone());
            let err = rehydrate(&mut root, &shape(json!({"c": 1})), &bytes, 24).unwrap_err();
            assert!(matches!(err, Error::Format(_)), "{bad}");
        }
    }

    #[test]
    fn missing_path_is_a_format_error() {
        let bytes = buffer();
        let mut root = to_view(json!({"a": 1}));
        let err = rehydrate(&mut root, &shape(json!({"b": {"c": 1}})), &bytes, 24).unwrap_err();
        assert!(matches!(err, Error::Format(_)));

        let mut root = to_view(json!({"b": 3}));
        let err = rehydrate(&mut root, &shape(json!({"b": {"c": 1}})), &bytes, 24).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn list_branch_skips_unnamed_items() {
        let bytes = buffer();
        let mut root = to_view(json!({"frames": [{"t": 0}, {"t": 1}, {"pos": [1, 8, 4]}]}));
        let keys = shape(json!({"frames": {"2": {"pos": 1}}}));

        assert_eq!(rehydrate(&mut root, &keys, &bytes, 24).unwrap(), 1);
        assert_eq!(root.array_at("frames/2/pos").unwrap().len(), 4);
        assert_eq!(root.get("frames/0/t").unwrap().as_int(), Some(0));
    }

    #[test]
    fn bad_list_positions_are_format_errors() {
        let bytes = buffer();
        for keys in [
            json!({"l": {"3": 1}}),
            json!({"l": {"01": 1}}),
            json!({"l": {"+0": 1}}),
            json!({"l": {"x": 1}}),
        ] {
            let mut root = to_view(json!({"l": [[1, 8, 4]]}));
            let err = rehydrate(&mut root, &shape(keys.clone()), &bytes, 24).unwrap_err();
            assert!(matches!(err, Error::Format(_)), "{keys}");
        }
    }

    #[test]
    fn list_index_is_canonical() {
        assert_eq!(list_index("0"), Some(0));
        assert_eq!(list_index("42"), Some(42));
        assert_eq!(list_index(""), None);
        assert_eq!(list_index("007"), None);
        assert_eq!(list_index("-1"), None);
    }
}
