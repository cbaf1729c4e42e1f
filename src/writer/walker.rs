//! Structure walk: find the numeric arrays and record where they live

use crate::types::{Array, KeyShape, Value};
use indexmap::IndexMap;

/// One array pulled out of the structure
#[derive(Debug)]
pub struct Extraction<'a> {
    /// Keys from the root to the array; list positions are decimal indices
    pub path: Vec<String>,
    pub array: &'a Array,
}

/// Result of walking a structure
#[derive(Debug, Default)]
pub struct Walk<'a> {
    /// Arrays in depth-first, insertion-order discovery order
    pub extractions: Vec<Extraction<'a>>,
    /// Key-shape tree covering exactly the extraction paths
    pub keys: IndexMap<String, KeyShape>,
}

/// Walk `root` depth-first without modifying it
pub fn walk(root: &Value) -> Walk<'_> {
    let mut walk = Walk::default();
    let mut path = Vec::new();
    visit(root, &mut path, &mut walk);
    walk
}

fn visit<'a>(value: &'a Value, path: &mut Vec<String>, walk: &mut Walk<'a>) {
    match value {
        Value::Array(array) => {
            log::trace!(
                "extracting {} x {} at /{}",
                array.len(),
                array.dtype().name(),
                path.join("/")
            );
            KeyShape::mark(&mut walk.keys, path);
            walk.extractions.push(Extraction {
                path: path.clone(),
                array,
            });
        }
        Value::Object(entries) => {
            for (key, child) in entries {
                path.push(key.clone());
                visit(child, path, walk);
                path.pop();
            }
        }
        Value::List(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(index.to_string());
                visit(child, path, walk);
                path.pop();
            }
        }
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => {}
    }
}
