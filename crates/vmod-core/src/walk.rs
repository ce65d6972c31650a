//! # Tree Walks
//!
//! Explicit-stack traversal of value trees. Caller-supplied data is never
//! walked with native recursion, and every walk is bounded by a maximum
//! nesting depth so that runaway structures fail cleanly.

use serde_json::Value;
use thiserror::Error;

use crate::object::is_leaf;
use crate::path::ObjectPath;

/// A leaf position: a scalar, `null`, or an empty container.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf<'v> {
    pub path: ObjectPath,
    pub value: &'v Value,
}

impl Leaf<'_> {
    /// True for the root position (an empty top-level container).
    pub fn is_root(&self) -> bool {
        self.path.is_root()
    }
}

/// A container nested deeper than the permitted bound.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("nesting at '{path}' exceeds the maximum depth of {max_depth}")]
pub struct DepthExceeded {
    /// Path of the container whose children would exceed the bound.
    pub path: ObjectPath,
    /// The bound that was exceeded.
    pub max_depth: usize,
}

/// Collect every leaf of `root` in document order (pre-order, keys in
/// insertion order, array elements by index).
///
/// An empty top-level container yields a single root leaf.
///
/// # Errors
///
/// Returns `DepthExceeded` if a non-empty container sits at depth
/// `max_depth` or deeper.
pub fn leaves(root: &Value, max_depth: usize) -> Result<Vec<Leaf<'_>>, DepthExceeded> {
    let mut found = Vec::new();
    let mut stack = vec![(ObjectPath::root(), root)];

    while let Some((path, value)) = stack.pop() {
        if is_leaf(value) {
            found.push(Leaf { path, value });
            continue;
        }
        if path.len() >= max_depth {
            return Err(DepthExceeded { path, max_depth });
        }
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter().rev() {
                    stack.push((path.child(key.as_str()), child));
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate().rev() {
                    stack.push((path.child(index), child));
                }
            }
            _ => {}
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(value: &Value) -> Vec<String> {
        leaves(value, 64)
            .unwrap()
            .into_iter()
            .map(|l| l.path.to_string())
            .collect()
    }

    #[test]
    fn test_document_order() {
        let doc = json!({"b": 1, "a": {"y": [true, {}], "x": null}, "c": []});
        assert_eq!(paths(&doc), vec!["b", "a/y/0", "a/y/1", "a/x", "c"]);
    }

    #[test]
    fn test_empty_root_is_single_leaf() {
        let doc = json!({});
        let found = leaves(&doc, 8).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].is_root());
    }

    #[test]
    fn test_leaf_values_are_borrowed() {
        let doc = json!({"a": [10, 20]});
        let found = leaves(&doc, 8).unwrap();
        assert_eq!(found[1].value, &json!(20));
    }

    #[test]
    fn test_depth_bound() {
        let doc = json!({"a": {"b": {"c": 1}}});
        assert!(leaves(&doc, 3).is_ok());
        let err = leaves(&doc, 2).unwrap_err();
        assert_eq!(err.path.to_string(), "a/b");
        assert_eq!(err.max_depth, 2);
    }

    #[test]
    fn test_deep_chain_does_not_overflow_stack() {
        let mut doc = json!(1);
        for _ in 0..2_000 {
            doc = json!([doc]);
        }
        assert!(leaves(&doc, 4_000).is_ok());
        assert!(leaves(&doc, 100).is_err());
        // serde_json drops deep values recursively; unwind it iteratively.
        while let Value::Array(mut items) = doc {
            doc = items.pop().unwrap_or(Value::Null);
        }
    }
}
