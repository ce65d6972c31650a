//! The resolution pass: defaults, required, allowed values, custom
//! validation, type and empty-string checks, per concrete schema entry.
//!
//! Defaults are written even under absent ancestors; the missing objects are
//! created on the way. The one exception is a default that would have to
//! create an array element the data never supplied. The required check is
//! waived for an absent position under an absent ancestor, so omitting an
//! optional sub-tree does not flag each of its fields.
//!
//! Data problems accumulate in the report. A defective callback aborts the
//! pass with a meta error.

use serde_json::Value;
use vmod_core::{
    lookup, ObjectPath, PathSegment, SchemaMetaError, ValidationIssue, ValidationReport, ValueType,
};

use crate::map::{MapEntry, SchemaMap};
use crate::meta::is_default_type;
use crate::schema::{DefaultOutcome, SchemaType, ValidationOutcome};

/// Run every check for every entry, in map order.
///
/// `base` is the caller's original object, handed to callbacks unchanged.
pub(crate) fn resolve(
    map: &SchemaMap<'_>,
    model: &mut Value,
    base: &Value,
    report: &mut ValidationReport,
) -> Result<(), SchemaMetaError> {
    for entry in map.entries() {
        resolve_entry(entry, model, base, report)?;
    }
    Ok(())
}

fn resolve_entry(
    entry: &MapEntry<'_>,
    model: &mut Value,
    base: &Value,
    report: &mut ValidationReport,
) -> Result<(), SchemaMetaError> {
    let node = entry.node;
    let path = entry.object_path();
    let schema_path = entry.schema_path();
    let mut value = path.lookup(model).cloned();
    if value.is_none() && node.has_default() && !creates_element(&path, model) {
        value = default_for(entry, base)?;
        if let Some(default) = &value {
            if !path.insert_into(model, default.clone()) {
                tracing::trace!(path = %path, "default not placed; a parent position holds a scalar");
            }
        }
    }

    let label = label(entry);
    let issue = |reason: String, value: Option<&Value>| {
        ValidationIssue::new(reason)
            .at_schema_path(schema_path.clone())
            .with_schema_node(node.summary())
            .with_value(value)
    };

    if value.is_none() && node.required {
        if ancestor_absent(&path, model) {
            tracing::trace!(path = %path, "required check waived; an ancestor is absent");
        } else {
            report.push(
                issue(format!("{schema_path} is required"), None),
                format!("{label} is required"),
            );
        }
    }

    if let Some(present) = &value {
        let allowed = node.allowed_list();
        if !allowed.is_empty() && !present.as_str().is_some_and(|s| allowed.contains(&s)) {
            report.push(
                issue(
                    format!(
                        "value {} is not one of the allowed values \"{}\"",
                        render(present),
                        node.allowed_values.as_deref().unwrap_or_default()
                    ),
                    Some(present),
                ),
                format!("{label} must be one of \"{}\"", allowed.join(", ")),
            );
        }
    }

    if let Some(function) = &node.validation_function {
        match function.call(value.as_ref(), node, base) {
            ValidationOutcome::Valid => {}
            ValidationOutcome::Invalid(message) => report.push(
                issue(
                    format!("validation function \"{}\" rejected the value", function.name()),
                    value.as_ref(),
                ),
                message,
            ),
            ValidationOutcome::Failed(message) => {
                return Err(SchemaMetaError::ValidationFunctionFailed {
                    schema_path: schema_path.clone(),
                    function: function.name().to_string(),
                    message,
                })
            }
        }
    }

    if let Some(present) = &value {
        let found = ValueType::of_value(present);
        if !node.node_type.accepts(found) {
            let message = if node.node_type == SchemaType::AnySupportedType {
                format!("\"{}\" is not valid for {label}", render(present))
            } else {
                format!("invalid value for {label}")
            };
            report.push(
                issue(
                    format!(
                        "value type is \"{found}\" whereas the schema specifies \"{}\"",
                        node.node_type
                    ),
                    Some(present),
                ),
                message,
            );
        }

        if let Value::String(s) = present {
            if s.trim().is_empty() {
                report.push(
                    issue("empty string values are not supported".to_string(), Some(present)),
                    format!("\"{s}\" is not valid for {label}"),
                );
            }
        }
    }

    Ok(())
}

/// Compute the default for an absent position.
fn default_for(entry: &MapEntry<'_>, base: &Value) -> Result<Option<Value>, SchemaMetaError> {
    let node = entry.node;
    if let Some(literal) = &node.default_value {
        return Ok(Some(literal.clone()));
    }
    let Some(function) = &node.default_function else {
        return Ok(None);
    };
    match function.call(None, node, base) {
        DefaultOutcome::Value(value) => {
            let found = ValueType::of_value(&value);
            if is_default_type(found) {
                Ok(Some(value))
            } else {
                Err(SchemaMetaError::InvalidDefaultType {
                    schema_path: entry.schema_path(),
                    found,
                })
            }
        }
        DefaultOutcome::Unset => Ok(None),
        DefaultOutcome::Failed(message) => Err(SchemaMetaError::DefaultFunctionFailed {
            schema_path: entry.schema_path(),
            function: function.name().to_string(),
            message,
        }),
    }
}

/// True if some strict ancestor of `path` is absent from `model`.
fn ancestor_absent(path: &ObjectPath, model: &Value) -> bool {
    path.ancestors().any(|ancestor| lookup(model, ancestor).is_none())
}

/// True if writing at `path` would create an array or an array element:
/// some segment from the first absent ancestor onward is an index.
fn creates_element(path: &ObjectPath, model: &Value) -> bool {
    let segments = path.segments();
    (1..segments.len())
        .find(|&n| lookup(model, &segments[..n]).is_none())
        .is_some_and(|n| segments[n - 1..].iter().any(PathSegment::is_index))
}

/// Name used for an entry in user-facing messages.
fn label(entry: &MapEntry<'_>) -> String {
    if let Some(name) = &entry.node.friendly_name {
        return name.clone();
    }
    let stripped = entry.stripped();
    match (entry.expanded, entry.field_name()) {
        (true, Some(_)) => stripped.join("/"),
        (false, Some(name)) => name.to_string(),
        (_, None) => entry.schema_path(),
    }
}

/// Strings verbatim, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
