//! Structural region to structure nodes

use crate::types::ValueView;
use serde_json::Value as JsonValue;

/// Convert parsed JSON into structure nodes, moving strings instead of copying
pub fn to_view<'a>(value: JsonValue) -> ValueView<'a> {
    match value {
        JsonValue::Null => ValueView::Null,
        JsonValue::Bool(b) => ValueView::Bool(b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => ValueView::Int(i),
            None => n.as_f64().map_or(ValueView::Null, ValueView::Float),
        },
        JsonValue::String(s) => ValueView::String(s),
        JsonValue::Array(items) => ValueView::List(items.into_iter().map(to_view).collect()),
        JsonValue::Object(entries) => {
            ValueView::Object(entries.into_iter().map(|(k, v)| (k, to_view(v))).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_split_into_int_and_float() {
        let view = to_view(json!([1, -2, 0.5, 2.0, 18446744073709551615u64]));
        let items = view.as_list().unwrap();
        assert_eq!(items[0], ValueView::Int(1));
        assert_eq!(items[1], ValueView::Int(-2));
        assert_eq!(items[2], ValueView::Float(0.5));
        assert_eq!(items[3], ValueView::Float(2.0));
        assert_eq!(items[4], ValueView::Float(u64::MAX as f64));
    }

    #[test]
    fn objects_keep_key_order() {
        let json: JsonValue = serde_json::from_str(r#"{"z":1,"a":{"m":null,"b":"s"}}"#).unwrap();
        let view = to_view(json);
        let keys: Vec<&str> = view.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
        let inner: Vec<&str> = view
            .get("a")
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(inner, vec!["m", "b"]);
        assert_eq!(view.get("a/b").unwrap().as_str(), Some("s"));
    }
}
