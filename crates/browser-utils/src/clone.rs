//! Deep cloning of composite JSON values.
//!
//! A deep clone walks every nested array and object and allocates a fresh
//! container for each, so the copy and the original share no composite.
//! Only a top-level composite may be cloned: scalars and `null` are
//! rejected with [`UtilError::InvalidArgument`].
//!
//! # Shapes
//!
//! Each value is classified as a [`Shape`] at every nesting level:
//!
//! - `Sequence` -- a JSON array, cloned index by index in order
//! - `Mapping` -- a JSON object, cloned key by key in insertion order
//! - `Scalar` -- anything else, copied as-is and never recursed into
//!
//! Recursion depth equals the nesting depth of the input. `Value` is an
//! owned tree, so a value cannot contain itself.

use crate::error::{Result, UtilError};
use serde_json::{Map, Value};

/// Shape classification of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Ordered, integer-indexed container (`Value::Array`).
    Sequence,
    /// String-keyed container (`Value::Object`).
    Mapping,
    /// Null, bool, number or string.
    Scalar,
}

impl Shape {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => Shape::Sequence,
            Value::Object(_) => Shape::Mapping,
            _ => Shape::Scalar,
        }
    }

    /// `true` for sequences and mappings.
    pub fn is_composite(self) -> bool {
        !matches!(self, Shape::Scalar)
    }
}

/// Deep-clone a composite JSON value.
///
/// Returns a value that is equal to `value` and that shares no array or
/// object with it. The input is never mutated.
///
/// # Errors
///
/// Returns `UtilError::InvalidArgument` if `value` is `null` or a scalar.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use browser_utils::deep_clone;
///
/// let original = json!([1, [2, 3], {"a": 4}]);
/// let copy = deep_clone(&original).unwrap();
/// assert_eq!(copy, original);
///
/// assert!(deep_clone(&json!(42)).is_err());
/// ```
pub fn deep_clone(value: &Value) -> Result<Value> {
    match Shape::of(value) {
        Shape::Scalar if value.is_null() => Err(UtilError::InvalidArgument(
            "deep_clone expects an array or object, got null".to_string(),
        )),
        Shape::Scalar => Err(UtilError::InvalidArgument(format!(
            "deep_clone expects an array or object, got {}",
            scalar_kind(value)
        ))),
        shape => {
            tracing::debug!(?shape, "deep cloning composite value");
            Ok(clone_composite(value))
        }
    }
}

/// Parse a JSON document, deep-clone it and serialize the copy.
///
/// This is the string-in/string-out form used by the WASM and CLI crates.
///
/// # Errors
///
/// Returns `UtilError::Json` if the input is not valid JSON, or
/// `UtilError::InvalidArgument` if the document is not an array or object.
pub fn deep_clone_json(json: &str) -> Result<String> {
    let value: Value = serde_json::from_str(json)?;
    let copy = deep_clone(&value)?;
    Ok(serde_json::to_string(&copy)?)
}

/// Internal recursive copy engine.
///
/// The shape is re-derived for every child, so an object holding an array
/// yields a fresh object holding a fresh array.
fn clone_composite(value: &Value) -> Value {
    match value {
        Value::Array(items) => clone_sequence(items),
        Value::Object(map) => clone_mapping(map),
        scalar => scalar.clone(),
    }
}

fn clone_sequence(items: &[Value]) -> Value {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(clone_composite(item));
    }
    Value::Array(out)
}

fn clone_mapping(map: &Map<String, Value>) -> Value {
    let mut out = Map::new();
    for (key, child) in map {
        out.insert(key.clone(), clone_composite(child));
    }
    Value::Object(out)
}

fn scalar_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) | Value::Object(_) => "composite",
    }
}
