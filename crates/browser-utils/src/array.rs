//! De-duplication of object arrays by a key field.

use serde_json::Value;
use std::collections::HashSet;

/// Keep the first element for each distinct value of `key`, preserving order.
///
/// Key values are compared the way JavaScript compares property names,
/// after `String()` coercion: `1`, `1.0` and `"1"` collide, `[1, 2]` and
/// `"1,2"` collide, every object is `"[object Object]"`, and a missing key
/// (or a non-object element) is `"undefined"`.
///
/// ```
/// use serde_json::json;
/// use browser_utils::dedup_by_key;
///
/// let items = vec![
///     json!({"id": 1, "v": "a"}),
///     json!({"id": 2, "v": "b"}),
///     json!({"id": 1, "v": "c"}),
/// ];
/// let unique = dedup_by_key(&items, "id");
/// assert_eq!(unique, vec![json!({"id": 1, "v": "a"}), json!({"id": 2, "v": "b"})]);
/// ```
pub fn dedup_by_key(items: &[Value], key: &str) -> Vec<Value> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(property_key(item.get(key))))
        .cloned()
        .collect()
}

fn property_key(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(value) => coerce(value),
    }
}

fn coerce(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                if f == 0.0 {
                    "0".to_string()
                } else {
                    format!("{:.0}", f)
                }
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        // Array.prototype.join renders null elements as empty strings.
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
