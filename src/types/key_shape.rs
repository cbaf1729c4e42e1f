//! Key-shape tree: which key paths of the structure hold extracted arrays

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Sentinel written at an extracted leaf
const EXTRACTED: u64 = 1;

/// Node of the key-shape tree.
///
/// Mirrors only the path prefixes that lead to at least one extracted array.
/// On the wire an `Extracted` leaf is the number `1` and a `Branch` is an
/// object keyed like the structure it shadows (list positions use their
/// decimal index as key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyShape {
    Extracted,
    Branch(IndexMap<String, KeyShape>),
}

impl KeyShape {
    /// Mark `path` as extracted below `root`, creating branches as needed
    pub fn mark(root: &mut IndexMap<String, KeyShape>, path: &[String]) {
        let Some((leaf, prefix)) = path.split_last() else {
            return;
        };
        let mut node = root;
        for key in prefix {
            let entry = node
                .entry(key.clone())
                .or_insert_with(|| KeyShape::Branch(IndexMap::new()));
            if let KeyShape::Extracted = entry {
                *entry = KeyShape::Branch(IndexMap::new());
            }
            node = match entry {
                KeyShape::Branch(children) => children,
                KeyShape::Extracted => return,
            };
        }
        node.insert(leaf.clone(), KeyShape::Extracted);
    }

    /// Number of extracted leaves below this node
    pub fn leaf_count(&self) -> usize {
        match self {
            KeyShape::Extracted => 1,
            KeyShape::Branch(children) => children.values().map(KeyShape::leaf_count).sum(),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            KeyShape::Extracted => JsonValue::from(EXTRACTED),
            KeyShape::Branch(children) => JsonValue::Object(
                children
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn from_json(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Number(n) if n.as_u64() == Some(EXTRACTED) => Ok(KeyShape::Extracted),
            JsonValue::Object(children) => children
                .iter()
                .map(|(k, v)| -> Result<(String, KeyShape)> {
                    Ok((k.clone(), KeyShape::from_json(v)?))
                })
                .collect::<Result<IndexMap<_, _>>>()
                .map(KeyShape::Branch),
            other => Err(Error::format(format!(
                "unexpected key-shape entry: {}",
                other
            ))),
        }
    }
}
