//! # Typed Object Paths
//!
//! A path is a sequence of object keys and array indices identifying one
//! position in a value tree. Keys and indices are distinct variants: only
//! array positions are numeric, so an object key such as `"2024"` is never
//! treated as an index.
//!
//! Paths render as `/`-joined segments (`items/1/name`), which is the form
//! used in error payloads and log fields.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One step in an [`ObjectPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

impl PathSegment {
    /// True for array indices.
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    /// The key text, if this is an object key.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(k) => Some(k),
            Self::Index(_) => None,
        }
    }

    /// The index, if this is an array position.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Key(_) => None,
            Self::Index(i) => Some(*i),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A location in a value tree. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectPath(Vec<PathSegment>);

impl ObjectPath {
    /// The root path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path extended by one segment.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for the empty path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// True if any segment is an array index.
    pub fn has_index(&self) -> bool {
        self.0.iter().any(PathSegment::is_index)
    }

    /// Strict ancestors of this path, outermost first, excluding the root.
    ///
    /// For `a/b/c` this yields `a` then `a/b`.
    pub fn ancestors(&self) -> impl Iterator<Item = &[PathSegment]> + '_ {
        (1..self.0.len()).map(move |n| &self.0[..n])
    }

    /// Look up the value at this path. `None` means the position is absent.
    pub fn lookup<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        lookup(root, &self.0)
    }

    /// Write `value` at this path, creating missing intermediate containers.
    ///
    /// See [`insert`].
    pub fn insert_into(&self, root: &mut Value, value: Value) -> bool {
        insert(root, &self.0, value)
    }
}

impl From<Vec<PathSegment>> for ObjectPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<PathSegment> for ObjectPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for ObjectPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Look up the value at `path` under `root`.
///
/// Keys only descend into objects and indices only into arrays; any other
/// combination is an absent position.
pub fn lookup<'v>(root: &'v Value, path: &[PathSegment]) -> Option<&'v Value> {
    path.iter().try_fold(root, |node, segment| match (node, segment) {
        (Value::Object(map), PathSegment::Key(key)) => map.get(key),
        (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
        _ => None,
    })
}

/// Write `value` at `path` under `root`.
///
/// Missing intermediate positions are created as objects (for key
/// segments) or arrays (for index segments); arrays are padded with `null`
/// up to the requested index. An existing key is overwritten in place, so
/// key order is preserved. Returns `false` without writing if an existing
/// intermediate position is a scalar, or if `path` is empty.
pub fn insert(root: &mut Value, path: &[PathSegment], value: Value) -> bool {
    let Some((last, parents)) = path.split_last() else {
        return false;
    };

    let mut node = root;
    for (i, segment) in parents.iter().enumerate() {
        let next_is_index = path[i + 1].is_index();
        node = match child_or_create(node, segment, next_is_index) {
            Some(child) => child,
            None => return false,
        };
    }

    match (node, last) {
        (Value::Object(map), PathSegment::Key(key)) => {
            map.insert(key.clone(), value);
            true
        }
        (Value::Array(items), PathSegment::Index(index)) => {
            if *index < items.len() {
                items[*index] = value;
            } else {
                items.resize(*index, Value::Null);
                items.push(value);
            }
            true
        }
        _ => false,
    }
}

fn child_or_create<'v>(
    node: &'v mut Value,
    segment: &PathSegment,
    next_is_index: bool,
) -> Option<&'v mut Value> {
    let empty = || {
        if next_is_index {
            Value::Array(Vec::new())
        } else {
            Value::Object(Map::new())
        }
    };

    match (node, segment) {
        (Value::Object(map), PathSegment::Key(key)) => {
            Some(map.entry(key.clone()).or_insert_with(empty))
        }
        (Value::Array(items), PathSegment::Index(index)) => {
            if *index >= items.len() {
                items.resize(*index, Value::Null);
                items.push(empty());
            }
            items.get_mut(*index)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(segments: Vec<PathSegment>) -> ObjectPath {
        ObjectPath::from(segments)
    }

    #[test]
    fn test_display_joins_segments() {
        let p = path(vec!["items".into(), 1.into(), "name".into()]);
        assert_eq!(p.to_string(), "items/1/name");
        assert_eq!(ObjectPath::root().to_string(), "");
    }

    #[test]
    fn test_has_index_ignores_numeric_keys() {
        let p = path(vec!["a".into(), 0.into(), "b".into(), 3.into(), "c".into()]);
        assert!(p.has_index());

        let numeric_key = path(vec!["2024".into(), "total".into()]);
        assert!(!numeric_key.has_index());
    }

    #[test]
    fn test_ancestors_exclude_root_and_self() {
        let p = path(vec!["a".into(), "b".into(), "c".into()]);
        let ancestors: Vec<String> = p
            .ancestors()
            .map(|s| ObjectPath::from(s.to_vec()).to_string())
            .collect();
        assert_eq!(ancestors, vec!["a", "a/b"]);
    }

    #[test]
    fn test_lookup() {
        let doc = json!({"items": [{"name": "a"}, {}], "n": null});
        let name = path(vec!["items".into(), 0.into(), "name".into()]);
        assert_eq!(name.lookup(&doc), Some(&json!("a")));

        let missing = path(vec!["items".into(), 1.into(), "name".into()]);
        assert_eq!(missing.lookup(&doc), None);

        let null = path(vec!["n".into()]);
        assert_eq!(null.lookup(&doc), Some(&Value::Null));

        // A key segment never descends into an array.
        let wrong_kind = path(vec!["items".into(), "0".into()]);
        assert_eq!(wrong_kind.lookup(&doc), None);
    }

    #[test]
    fn test_insert_existing_key_keeps_order() {
        let mut doc = json!({"a": 1, "b": 2, "c": 3});
        assert!(insert(&mut doc, &["b".into()], json!("x")));
        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(doc["b"], "x");
    }

    #[test]
    fn test_insert_creates_intermediate_containers() {
        let mut doc = json!({});
        let p = path(vec!["email".into(), 0.into(), "label".into()]);
        assert!(p.insert_into(&mut doc, json!("home")));
        assert_eq!(doc, json!({"email": [{"label": "home"}]}));
    }

    #[test]
    fn test_insert_pads_arrays_with_null() {
        let mut doc = json!({"tags": ["a"]});
        assert!(insert(&mut doc, &["tags".into(), 2.into()], json!("c")));
        assert_eq!(doc, json!({"tags": ["a", null, "c"]}));
    }

    #[test]
    fn test_insert_refuses_scalar_parent() {
        let mut doc = json!({"a": "text"});
        assert!(!insert(&mut doc, &["a".into(), "b".into()], json!(1)));
        assert_eq!(doc, json!({"a": "text"}));
        assert!(!insert(&mut doc, &[], json!(1)));
    }

    #[test]
    fn test_serialize_as_string() {
        let p = path(vec!["a".into(), 0.into()]);
        assert_eq!(serde_json::to_value(&p).unwrap(), json!("a/0"));
    }
}
