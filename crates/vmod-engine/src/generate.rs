//! Model generation entry points.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vmod_core::{leaves, ModelError, SchemaMetaError, SchemaValidationError, ValidationReport, ValueType};

use crate::clone::{clone_model, depth_error};
use crate::map::SchemaMap;
use crate::schema::Schema;
use crate::{coverage, meta, resolve};

/// Default bound on nesting depth for both the schema and the object.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Per-call generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Deepest permitted nesting, counted in path segments.
    pub max_depth: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Validate `base` against `schema` and return a default-filled copy.
///
/// # Errors
///
/// - [`ModelError::SchemaMeta`] if the schema is malformed, the base object
///   is not an array or an object, or a schema callback fails.
/// - [`ModelError::Validation`] carrying every data problem found.
pub fn generate(base: &Value, schema: &Schema) -> Result<Value, ModelError> {
    generate_with(base, schema, &GenerateOptions::default())
}

/// [`generate`] under explicit options.
pub fn generate_with(
    base: &Value,
    schema: &Schema,
    options: &GenerateOptions,
) -> Result<Value, ModelError> {
    let schema_leaves = meta::validate(schema, options.max_depth)?;

    if !base.is_object() && !base.is_array() {
        return Err(SchemaMetaError::InvalidBaseObject {
            found: ValueType::of_value(base),
        }
        .into());
    }

    let mut model = clone_model(base, options.max_depth)?;
    let mut map = SchemaMap::build(schema_leaves);
    let mut report = ValidationReport::new();

    {
        let object_leaves = leaves(&model, options.max_depth).map_err(depth_error)?;

        let templates = map.template_count();
        map.record(&object_leaves);
        map.expand();
        tracing::debug!(
            leaves = object_leaves.len(),
            templates,
            entries = map.len(),
            "schema map expanded"
        );

        coverage::check(&map, &object_leaves, &mut report);
    }

    resolve::resolve(&map, &mut model, base, &mut report)?;

    if report.is_empty() {
        tracing::debug!("model generated");
        Ok(model)
    } else {
        tracing::debug!(errors = report.len(), "model failed validation");
        Err(SchemaValidationError::new(report).into())
    }
}

impl Schema {
    /// Validate `base` against this schema. See [`generate`].
    pub fn generate(&self, base: &Value) -> Result<Value, ModelError> {
        generate(base, self)
    }

    /// Validate `base` against this schema under explicit options.
    pub fn generate_with(&self, base: &Value, options: &GenerateOptions) -> Result<Value, ModelError> {
        generate_with(base, self, options)
    }
}
