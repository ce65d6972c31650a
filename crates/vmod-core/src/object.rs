//! Container predicates.

use serde_json::Value;

/// True if `value` is an object or array with no entries.
///
/// Scalars are never "empty": they are not containers.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// True if `value` has no children: any scalar, `null`, or an empty container.
pub fn is_leaf(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => true,
    }
}
