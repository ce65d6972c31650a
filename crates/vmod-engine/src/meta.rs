//! Schema meta-validation.
//!
//! Rejects malformed schemas before any data is touched. The walk uses an
//! explicit stack and visits the tree in definition order, so the first
//! defect reported is the first one a reader of the schema would meet.

use vmod_core::{is_alphanumeric_inc_underscore, SchemaMetaError, ValueType};

use crate::map::TemplateSegment;
use crate::parse::has_extension_prefix;
use crate::schema::{Schema, SchemaNode, SchemaTree};

/// A schema leaf and its template path.
#[derive(Debug, Clone)]
pub(crate) struct SchemaLeaf<'s> {
    pub segments: Vec<TemplateSegment<'s>>,
    pub node: &'s SchemaNode,
}

/// Check `schema` and return its leaves in definition order.
pub(crate) fn validate(schema: &Schema, max_depth: usize) -> Result<Vec<SchemaLeaf<'_>>, SchemaMetaError> {
    match schema.root() {
        SchemaTree::Node(_) => {
            return Err(SchemaMetaError::SchemaNodeNotFound {
                schema_path: String::new(),
            })
        }
        SchemaTree::Fields(fields) if fields.is_empty() => return Err(SchemaMetaError::EmptySchema),
        _ => {}
    }

    let mut found = Vec::new();
    let mut stack: Vec<(Vec<TemplateSegment<'_>>, &SchemaTree)> = vec![(Vec::new(), schema.root())];

    while let Some((path, tree)) = stack.pop() {
        if path.len() > max_depth {
            return Err(SchemaMetaError::NestingTooDeep {
                schema_path: render(&path),
                max_depth,
            });
        }
        match tree {
            SchemaTree::Fields(fields) => {
                if fields.is_empty() {
                    return Err(SchemaMetaError::SchemaNodeNotFound {
                        schema_path: render(&path),
                    });
                }
                for (key, _) in fields.iter() {
                    if !is_alphanumeric_inc_underscore(key) {
                        return Err(SchemaMetaError::InvalidKeyName {
                            schema_path: render(&path),
                            key: key.to_string(),
                        });
                    }
                }
                for (key, child) in fields.iter().rev() {
                    let mut child_path = path.clone();
                    child_path.push(TemplateSegment::Key(key));
                    stack.push((child_path, child));
                }
            }
            SchemaTree::Repeat(item) => {
                let mut item_path = path;
                item_path.push(TemplateSegment::Placeholder);
                stack.push((item_path, &**item));
            }
            SchemaTree::Node(node) => {
                check_node(node, &path)?;
                found.push(SchemaLeaf { segments: path, node });
            }
        }
    }

    Ok(found)
}

fn check_node(node: &SchemaNode, path: &[TemplateSegment<'_>]) -> Result<(), SchemaMetaError> {
    for name in node.extensions.keys() {
        if !has_extension_prefix(name) {
            return Err(SchemaMetaError::UnknownProperty {
                schema_path: render(path),
                property: name.clone(),
            });
        }
        if !is_alphanumeric_inc_underscore(name) {
            return Err(SchemaMetaError::InvalidKeyName {
                schema_path: render(path),
                key: name.clone(),
            });
        }
    }

    if let Some(value) = &node.default_value {
        let found = ValueType::of_value(value);
        if !is_default_type(found) {
            return Err(SchemaMetaError::InvalidDefaultType {
                schema_path: render(path),
                found,
            });
        }
    }

    if node.default_value.is_some() && node.default_function.is_some() {
        return Err(SchemaMetaError::ConflictingDefaults {
            schema_path: render(path),
        });
    }
    if node.allowed_values.is_some() && node.validation_function.is_some() {
        return Err(SchemaMetaError::ConflictingChecks {
            schema_path: render(path),
        });
    }
    Ok(())
}

/// Types a default may produce.
pub(crate) fn is_default_type(found: ValueType) -> bool {
    matches!(
        found,
        ValueType::Null | ValueType::Boolean | ValueType::String | ValueType::Number
    )
}

/// Render a template path as `a/{n}/b`.
pub(crate) fn render(path: &[TemplateSegment<'_>]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/")
}
