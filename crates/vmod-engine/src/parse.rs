//! Schema documents.
//!
//! Converts a JSON schema document (YAML documents convert into the same
//! shape) into a [`Schema`]. In a document:
//!
//! - an object holding a `type` property, or any scalar property, is a
//!   schema node;
//! - an object holding only objects and arrays is a field group;
//! - an array of exactly one element is a repeat branch.
//!
//! Callbacks cannot be written in a document. Attach them in code with
//! [`Schema::node_mut`] after loading.

use serde_json::{Map, Value};
use vmod_core::{is_alphanumeric_inc_underscore, is_empty, SchemaMetaError, ValueType};

use crate::generate::GenerateOptions;
use crate::schema::{Fields, Schema, SchemaNode, SchemaTree, SchemaType, EXTENSION_PREFIX, PLACEHOLDER};

impl Schema {
    /// Parse a schema document.
    ///
    /// # Errors
    ///
    /// Returns the [`SchemaMetaError`] describing the first defect found.
    /// Key names are checked before the node beneath them is read. Checks
    /// that also apply to code-built schemas (conflicting properties,
    /// default types) are left to meta-validation at generation time.
    pub fn from_json(document: &Value) -> Result<Self, SchemaMetaError> {
        Self::from_json_with(document, &GenerateOptions::default())
    }

    /// Parse a schema document under explicit options.
    pub fn from_json_with(
        document: &Value,
        options: &GenerateOptions,
    ) -> Result<Self, SchemaMetaError> {
        let parser = Parser {
            max_depth: options.max_depth,
        };
        if is_empty(document) {
            return Err(SchemaMetaError::EmptySchema);
        }
        let root = match document {
            Value::Object(map) => SchemaTree::Fields(parser.fields(map, &[], 0)?),
            Value::Array(items) => parser.repeat(items, &[], 0)?,
            other => {
                return Err(SchemaMetaError::InvalidSchemaRoot {
                    found: ValueType::of_value(other),
                })
            }
        };
        Ok(Self::new(root))
    }
}

struct Parser {
    max_depth: usize,
}

impl Parser {
    fn tree(&self, value: &Value, path: &[&str], depth: usize) -> Result<SchemaTree, SchemaMetaError> {
        if depth > self.max_depth {
            return Err(SchemaMetaError::NestingTooDeep {
                schema_path: path.join("/"),
                max_depth: self.max_depth,
            });
        }
        match value {
            Value::Array(items) => self.repeat(items, path, depth),
            Value::Object(map) if is_node(map) => Ok(SchemaTree::Node(node(map, path)?)),
            Value::Object(map) if !map.is_empty() => Ok(SchemaTree::Fields(self.fields(map, path, depth)?)),
            _ => Err(SchemaMetaError::SchemaNodeNotFound {
                schema_path: path.join("/"),
            }),
        }
    }

    fn fields(
        &self,
        map: &Map<String, Value>,
        path: &[&str],
        depth: usize,
    ) -> Result<Fields, SchemaMetaError> {
        let mut fields = Fields::new();
        for (key, child) in map {
            if !is_alphanumeric_inc_underscore(key) {
                return Err(SchemaMetaError::InvalidKeyName {
                    schema_path: path.join("/"),
                    key: key.clone(),
                });
            }
            let mut child_path = path.to_vec();
            child_path.push(key.as_str());
            fields.insert(key.as_str(), self.tree(child, &child_path, depth + 1)?);
        }
        Ok(fields)
    }

    fn repeat(&self, items: &[Value], path: &[&str], depth: usize) -> Result<SchemaTree, SchemaMetaError> {
        match items {
            [item] => {
                let mut item_path = path.to_vec();
                item_path.push(PLACEHOLDER);
                Ok(SchemaTree::repeat(self.tree(item, &item_path, depth + 1)?))
            }
            _ => Err(SchemaMetaError::InvalidRepeat {
                schema_path: path.join("/"),
                len: items.len(),
            }),
        }
    }
}

fn is_node(map: &Map<String, Value>) -> bool {
    map.contains_key("type") || map.values().any(|v| !v.is_object() && !v.is_array())
}

fn node(map: &Map<String, Value>, path: &[&str]) -> Result<SchemaNode, SchemaMetaError> {
    let schema_path = path.join("/");
    let invalid = |property: &str, expected: &str| SchemaMetaError::InvalidPropertyValue {
        schema_path: schema_path.clone(),
        property: property.to_string(),
        expected: expected.to_string(),
    };

    let node_type = match map.get("type") {
        None => {
            return Err(SchemaMetaError::MissingType {
                schema_path: schema_path.clone(),
            })
        }
        Some(Value::String(name)) => {
            SchemaType::parse(name).ok_or_else(|| SchemaMetaError::UnknownType {
                schema_path: schema_path.clone(),
                found: name.clone(),
            })?
        }
        Some(_) => return Err(invalid("type", "a string")),
    };

    let mut node = SchemaNode::new(node_type);
    for (property, value) in map {
        match property.as_str() {
            "type" => {}
            "required" => node.required = value.as_bool().ok_or_else(|| invalid("required", "a boolean"))?,
            "defaultValue" => node.default_value = Some(value.clone()),
            "allowedValues" => match value {
                Value::String(list) => node.allowed_values = Some(list.clone()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(SchemaMetaError::AllowedValuesNotString {
                        schema_path: schema_path.clone(),
                    })
                }
                _ => return Err(invalid("allowedValues", "a comma separated string")),
            },
            "friendlyName" => {
                let name = value.as_str().ok_or_else(|| invalid("friendlyName", "a string"))?;
                node.friendly_name = Some(name.to_string());
            }
            "defaultFunction" | "validationFunction" => {
                return Err(invalid(property.as_str(), "a function attached in code"));
            }
            other if has_extension_prefix(other) => {
                node.extensions.insert(other.to_string(), value.clone());
            }
            other => {
                return Err(SchemaMetaError::UnknownProperty {
                    schema_path: schema_path.clone(),
                    property: other.to_string(),
                })
            }
        }
    }
    Ok(node)
}

/// True if `name` starts with the reserved extension prefix, ignoring ASCII case.
pub(crate) fn has_extension_prefix(name: &str) -> bool {
    name.get(..EXTENSION_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(EXTENSION_PREFIX))
}
