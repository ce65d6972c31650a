//! Leaf coverage: the schema is a closed description of the object's shape.

use vmod_core::{Leaf, PathSegment, ValidationIssue, ValidationReport};

use crate::map::SchemaMap;

/// Report every non-root object leaf that no schema entry accounts for.
///
/// A leaf is covered when its path is an entry's path, or when any of its
/// key segments, innermost first, appears in some entry's stripped path.
/// The latter lets `simpleObject` and `anySupportedType` fields hold
/// content the schema does not enumerate.
pub(crate) fn check(map: &SchemaMap<'_>, leaves: &[Leaf<'_>], report: &mut ValidationReport) {
    let paths = map.object_paths();
    let names = map.key_names();

    for leaf in leaves.iter().filter(|l| !l.is_root()) {
        if paths.contains(&leaf.path) {
            continue;
        }
        let covered = leaf
            .path
            .segments()
            .iter()
            .rev()
            .filter_map(PathSegment::as_key)
            .any(|key| names.contains(key));
        if covered {
            continue;
        }

        let field = match leaf.path.last() {
            Some(PathSegment::Key(key)) => key.clone(),
            _ => leaf.path.to_string(),
        };
        report.push(
            ValidationIssue::new(format!("object path {} not found in schema", leaf.path))
                .at_object_path(leaf.path.to_string())
                .with_value(Some(leaf.value)),
            format!("{field} is not valid"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta;
    use crate::schema::{Fields, Schema, SchemaNode, SchemaTree};
    use serde_json::{json, Value};
    use vmod_core::leaves;

    fn uncovered(schema: &Schema, data: &Value) -> Vec<String> {
        let mut map = SchemaMap::build(meta::validate(schema, 32).unwrap());
        let found = leaves(data, 32).unwrap();
        map.record(&found);
        map.expand();
        let mut report = ValidationReport::new();
        check(&map, &found, &mut report);
        report.user_friendly_errors().to_vec()
    }

    fn schema() -> Schema {
        Schema::object(
            Fields::new()
                .field("name", SchemaNode::string())
                .field("data", SchemaNode::simple_object())
                .field("tags", SchemaTree::repeat(SchemaNode::string())),
        )
    }

    #[test]
    fn test_unknown_field_reported() {
        let errors = uncovered(&schema(), &json!({"name": "a", "nickname": "b"}));
        assert_eq!(errors, vec!["nickname is not valid"]);
    }

    #[test]
    fn test_simple_object_content_is_covered() {
        let data = json!({"data": {"anything": {"deep": [1, 2]}}});
        assert!(uncovered(&schema(), &data).is_empty());
    }

    #[test]
    fn test_array_elements_are_covered() {
        let data = json!({"tags": ["a", "b", "c"]});
        assert!(uncovered(&schema(), &data).is_empty());
    }

    #[test]
    fn test_root_array_scalars_use_exact_paths() {
        let schema = Schema::repeat(SchemaNode::number());
        assert!(uncovered(&schema, &json!([1, 2, 3])).is_empty());
        // An object where a scalar element belongs has keys the schema never names.
        assert_eq!(uncovered(&schema, &json!([1, {"x": 2}])), vec!["x is not valid"]);
    }

    #[test]
    fn test_empty_base_is_not_checked() {
        assert!(uncovered(&schema(), &json!({})).is_empty());
    }
}
