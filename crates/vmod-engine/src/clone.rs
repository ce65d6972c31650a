//! Base object cloning and identifier normalization.

use serde_json::Value;
use vmod_core::{leaves, DepthExceeded, SchemaValidationError, ValidationIssue, ValidationReport};

/// Field name whose values are normalized to strings in the clone.
const ID_FIELD: &str = "_id";

/// Deep-copy `base`, replacing every non-null `_id` value with its string form.
///
/// # Errors
///
/// An object nested deeper than `max_depth` is a data error with a single
/// issue naming the offending path. The depth is checked before copying.
pub(crate) fn clone_model(base: &Value, max_depth: usize) -> Result<Value, SchemaValidationError> {
    leaves(base, max_depth).map_err(depth_error)?;

    let mut model = base.clone();
    normalize_ids(&mut model);
    Ok(model)
}

/// An over-deep object as a single-issue data error.
pub(crate) fn depth_error(e: DepthExceeded) -> SchemaValidationError {
    let mut report = ValidationReport::new();
    report.push(
        ValidationIssue::new(e.to_string()).at_object_path(e.path.to_string()),
        format!("the object is nested more than {} levels deep", e.max_depth),
    );
    SchemaValidationError::new(report)
}

fn normalize_ids(root: &mut Value) {
    let mut stack = vec![root];
    while let Some(value) = stack.pop() {
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter_mut() {
                    if key == ID_FIELD {
                        if let Some(id) = id_string(child) {
                            *child = Value::String(id);
                            continue;
                        }
                    }
                    stack.push(child);
                }
            }
            Value::Array(items) => stack.extend(items.iter_mut()),
            _ => {}
        }
    }
}

/// String form of an identifier, or `None` when it should stay as is.
///
/// Extended-JSON object ids (`{"$oid": "..."}`) collapse to the inner hex
/// string.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::String(_) => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => match (map.len(), map.get("$oid")) {
            (1, Some(Value::String(oid))) => Some(oid.clone()),
            _ => Some(value.to_string()),
        },
        Value::Array(_) => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clone_leaves_base_untouched() {
        let base = json!({"_id": 42, "a": {"_id": {"$oid": "65a1f0"}}});
        let model = clone_model(&base, 16).unwrap();
        assert_eq!(model, json!({"_id": "42", "a": {"_id": "65a1f0"}}));
        assert_eq!(base["_id"], json!(42));
    }

    #[test]
    fn test_id_forms() {
        let base = json!([
            {"_id": "abc"},
            {"_id": true},
            {"_id": null},
            {"_id": [1, 2]},
            {"_id": {"a": 1}}
        ]);
        let model = clone_model(&base, 16).unwrap();
        assert_eq!(
            model,
            json!([
                {"_id": "abc"},
                {"_id": "true"},
                {"_id": null},
                {"_id": "[1,2]"},
                {"_id": "{\"a\":1}"}
            ])
        );
    }

    #[test]
    fn test_only_id_keys_are_touched() {
        let base = json!({"id": 7, "nested": [{"x_id": 1}]});
        assert_eq!(clone_model(&base, 16).unwrap(), base);
    }

    #[test]
    fn test_over_deep_object_is_data_error() {
        let base = json!({"a": {"b": {"c": 1}}});
        let err = clone_model(&base, 2).unwrap_err();
        assert_eq!(err.count(), 1);
        assert_eq!(err.errors()[0].object_path.as_deref(), Some("a/b"));
    }
}
