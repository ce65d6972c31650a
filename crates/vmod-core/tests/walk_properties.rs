//! Property tests tying the tree walk to path lookup: every leaf the walk
//! reports can be found again at its path, and leaf paths are unique.

use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::Value;
use vmod_core::{leaves, ValueType};

/// Strategy for JSON values without floats, keys limited to key-name characters.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| serde_json::json!(n)),
        "[a-zA-Z0-9_ ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,6}", inner, 0..5).prop_map(|m| {
                let map: serde_json::Map<String, Value> = m.into_iter().collect();
                Value::Object(map)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn every_leaf_is_found_at_its_path(value in json_value()) {
        for leaf in leaves(&value, 64).unwrap() {
            prop_assert_eq!(leaf.path.lookup(&value), Some(leaf.value));
        }
    }

    #[test]
    fn leaf_paths_are_unique(value in json_value()) {
        let found = leaves(&value, 64).unwrap();
        let distinct: HashSet<_> = found.iter().map(|l| l.path.clone()).collect();
        prop_assert_eq!(distinct.len(), found.len());
    }

    #[test]
    fn leaves_are_never_non_empty_containers(value in json_value()) {
        for leaf in leaves(&value, 64).unwrap() {
            let kind = ValueType::of_value(leaf.value);
            if kind.is_container() {
                prop_assert!(vmod_core::is_empty(leaf.value));
            }
        }
    }
}
