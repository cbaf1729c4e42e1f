//! Structure nodes - owned and view variants

use super::{Array, ArrayView, Element};
use crate::error::AccessError;
use indexmap::IndexMap;

/// Kind of a structure node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
    List,
}

/// Owned structure node (for building/encoding)
///
/// Objects keep their keys unique and in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Array),
    Object(IndexMap<String, Value>),
    List(Vec<Value>),
}

impl Value {
    /// Get the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::List(_) => ValueKind::List,
        }
    }

    /// Build an object from `(key, value)` pairs; later duplicates replace earlier ones
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// Convenience From impls for Value
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl<T: Element> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(Array::from(v))
    }
}

/// Decoded structure node - numeric arrays reference the container buffer (zero-copy)
#[derive(Debug, Clone, PartialEq)]
pub enum ValueView<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(ArrayView<'a>),
    Object(IndexMap<String, ValueView<'a>>),
    List(Vec<ValueView<'a>>),
}

impl<'a> ValueView<'a> {
    pub fn kind(&self) -> ValueKind {
        match self {
            ValueView::Null => ValueKind::Null,
            ValueView::Bool(_) => ValueKind::Bool,
            ValueView::Int(_) => ValueKind::Int,
            ValueView::Float(_) => ValueKind::Float,
            ValueView::String(_) => ValueKind::String,
            ValueView::Array(_) => ValueKind::Array,
            ValueView::Object(_) => ValueKind::Object,
            ValueView::List(_) => ValueKind::List,
        }
    }

    /// Convert to owned Value, copying array data out of the buffer
    pub fn to_owned(&self) -> Value {
        match self {
            ValueView::Null => Value::Null,
            ValueView::Bool(b) => Value::Bool(*b),
            ValueView::Int(i) => Value::Int(*i),
            ValueView::Float(f) => Value::Float(*f),
            ValueView::String(s) => Value::String(s.clone()),
            ValueView::Array(a) => Value::Array(a.to_owned()),
            ValueView::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_owned()))
                    .collect(),
            ),
            ValueView::List(items) => Value::List(items.iter().map(|v| v.to_owned()).collect()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ValueView::Null)
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ValueView::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ValueView::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64; integers are widened
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ValueView::Float(f) => Some(*f),
            ValueView::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ValueView::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as numeric array
    pub fn as_array(&self) -> Option<&ArrayView<'a>> {
        match self {
            ValueView::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as object
    pub fn as_object(&self) -> Option<&IndexMap<String, ValueView<'a>>> {
        match self {
            ValueView::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[ValueView<'a>]> {
        match self {
            ValueView::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get a nested value by slash-separated path (e.g., "geometry/attributes/position").
    ///
    /// List elements are addressed by their decimal index.
    pub fn get(&self, path: &str) -> Option<&ValueView<'a>> {
        let mut current = self;
        for key in path.split('/') {
            current = match current {
                ValueView::Object(entries) => entries.get(key)?,
                ValueView::List(items) => items.get(key.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Get the numeric array at `path`
    pub fn array_at(&self, path: &str) -> Result<&ArrayView<'a>, AccessError> {
        let value = self.get(path).ok_or_else(|| AccessError::NotFound {
            path: path.to_string(),
        })?;
        value.as_array().ok_or_else(|| AccessError::TypeMismatch {
            path: path.to_string(),
            expected: "array",
            actual: value.kind(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DType;

    fn sample(data: &[u8]) -> ValueView<'_> {
        ValueView::Object(IndexMap::from([
            ("name".to_string(), ValueView::String("mesh".into())),
            (
                "children".to_string(),
                ValueView::List(vec![ValueView::Object(IndexMap::from([(
                    "index".to_string(),
                    ValueView::Array(ArrayView {
                        dtype: DType::U8,
                        offset: 8,
                        data,
                    }),
                )]))]),
            ),
        ]))
    }

    #[test]
    fn get_walks_objects_and_lists() {
        let data = [1u8, 2, 3];
        let view = sample(&data);
        assert_eq!(view.get("name").unwrap().as_str(), Some("mesh"));
        let index = view.get("children/0/index").unwrap().as_array().unwrap();
        assert_eq!(index.len(), 3);
        assert!(view.get("children/1/index").is_none());
        assert!(view.get("children/x").is_none());
        assert!(view.get("name/deeper").is_none());
    }

    #[test]
    fn array_at_reports_mismatches() {
        let data = [0u8; 2];
        let view = sample(&data);
        assert!(view.array_at("children/0/index").is_ok());
        assert_eq!(
            view.array_at("missing"),
            Err(AccessError::NotFound {
                path: "missing".into()
            })
        );
        assert_eq!(
            view.array_at("name"),
            Err(AccessError::TypeMismatch {
                path: "name".into(),
                expected: "array",
                actual: ValueKind::String,
            })
        );
    }

    #[test]
    fn to_owned_copies_arrays() {
        let data = [9u8, 8];
        let owned = sample(&data).to_owned();
        let Value::Object(root) = owned else {
            panic!("expected object");
        };
        let Value::List(children) = &root["children"] else {
            panic!("expected list");
        };
        let Value::Object(child) = &children[0] else {
            panic!("expected object");
        };
        assert_eq!(child["index"], Value::Array(Array::from_slice(&[9u8, 8])));
    }

    #[test]
    fn object_builder_keeps_order() {
        let value = Value::object([("b", Value::Int(1)), ("a", Value::Null)]);
        let Value::Object(map) = value else {
            panic!("expected object");
        };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
