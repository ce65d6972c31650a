//! # Error Types: Two-Tier Taxonomy
//!
//! Model generation fails in exactly one of two ways:
//!
//! - [`SchemaMetaError`]: the schema itself is malformed, or one of its
//!   callbacks misbehaves. A defect in schema authorship; fatal to the call
//!   and never collected alongside data errors.
//! - [`SchemaValidationError`]: the data does not conform to an otherwise
//!   valid schema. Always carries the complete list of problems found in
//!   one pass, never just the first.
//!
//! [`ModelError`] joins the two so callers can route them separately
//! (end-user 4xx response vs. operator-visible configuration defect).

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::ValueType;

/// Top-level error returned by model generation.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The schema is malformed.
    #[error(transparent)]
    SchemaMeta(#[from] SchemaMetaError),

    /// The data failed validation against the schema.
    #[error(transparent)]
    Validation(#[from] SchemaValidationError),
}

impl ModelError {
    /// True if this is a schema authorship defect rather than bad data.
    pub fn is_meta(&self) -> bool {
        matches!(self, Self::SchemaMeta(_))
    }

    /// The validation report, if this is a data error.
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Validation(e) => Some(e.report()),
            Self::SchemaMeta(_) => None,
        }
    }
}

/// The schema (or a schema-supplied callback) is defective.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaMetaError {
    /// The schema root is not an array or an object.
    #[error("schema must be an array or a simple object, found {found}")]
    InvalidSchemaRoot {
        /// Type of the value supplied as the schema root.
        found: ValueType,
    },

    /// The schema has no fields.
    #[error("schema cannot be empty")]
    EmptySchema,

    /// The base object is not an array or an object.
    #[error("base object must be an array or a simple object, found {found}")]
    InvalidBaseObject {
        /// Type of the supplied base object.
        found: ValueType,
    },

    /// A key contains characters other than letters, digits and underscore.
    #[error("only letters, numbers and the underscore (_) are permitted in key names: '{key}' at '{schema_path}'")]
    InvalidKeyName { schema_path: String, key: String },

    /// A position that must hold a schema node or a field group holds
    /// neither (a scalar, or an empty object).
    #[error("a valid schema node was not found at '{schema_path}'; make sure the schema node is an object")]
    SchemaNodeNotFound { schema_path: String },

    /// A schema node has no `type` property.
    #[error("schema node at '{schema_path}' has no \"type\" property")]
    MissingType { schema_path: String },

    /// A schema node declares a type outside the supported set.
    #[error("schema node type \"{found}\" at '{schema_path}' is invalid; value must be one of \"string, number, boolean, simpleObject, function, anySupportedType\"")]
    UnknownType { schema_path: String, found: String },

    /// A schema node carries a property that is neither whitelisted nor a
    /// `custom*` extension.
    #[error("schema node property \"{property}\" at '{schema_path}' is invalid; it must begin with \"custom\" or be one of \"type, required, defaultValue, defaultFunction, allowedValues, friendlyName, validationFunction\"")]
    UnknownProperty { schema_path: String, property: String },

    /// A whitelisted property holds a value of the wrong kind.
    #[error("schema node property \"{property}\" at '{schema_path}' must be {expected}")]
    InvalidPropertyValue {
        schema_path: String,
        property: String,
        expected: String,
    },

    /// `allowedValues` was declared as an array or object.
    #[error("allowedValues at '{schema_path}' cannot be an array or an object; use a comma separated string instead")]
    AllowedValuesNotString { schema_path: String },

    /// A repeat branch does not hold exactly one element.
    #[error("repeat branch at '{schema_path}' must hold exactly one schema element, found {len}")]
    InvalidRepeat { schema_path: String, len: usize },

    /// Both `defaultValue` and `defaultFunction` are present.
    #[error("a \"defaultValue\" and a \"defaultFunction\" cannot both be present in the schema node at '{schema_path}'")]
    ConflictingDefaults { schema_path: String },

    /// Both `allowedValues` and `validationFunction` are present.
    #[error("\"allowedValues\" and \"validationFunction\" cannot both be present in the schema node at '{schema_path}'")]
    ConflictingChecks { schema_path: String },

    /// A default (literal or computed) is not a primitive.
    #[error("unexpected default value type \"{found}\" at '{schema_path}'")]
    InvalidDefaultType { schema_path: String, found: ValueType },

    /// A default function reported failure.
    #[error("default function \"{function}\" at '{schema_path}' errored out: {message}")]
    DefaultFunctionFailed {
        schema_path: String,
        function: String,
        message: String,
    },

    /// A validation function reported failure (as opposed to rejecting the value).
    #[error("validation function \"{function}\" at '{schema_path}' errored out: {message}")]
    ValidationFunctionFailed {
        schema_path: String,
        function: String,
        message: String,
    },

    /// The schema tree nests deeper than the permitted bound.
    #[error("schema nesting at '{schema_path}' exceeds the maximum depth of {max_depth}")]
    NestingTooDeep { schema_path: String, max_depth: usize },
}

impl SchemaMetaError {
    /// Path of the offending schema node, when the error is tied to one.
    pub fn schema_path(&self) -> Option<&str> {
        match self {
            Self::InvalidSchemaRoot { .. } | Self::EmptySchema | Self::InvalidBaseObject { .. } => {
                None
            }
            Self::InvalidKeyName { schema_path, .. }
            | Self::SchemaNodeNotFound { schema_path }
            | Self::MissingType { schema_path }
            | Self::UnknownType { schema_path, .. }
            | Self::UnknownProperty { schema_path, .. }
            | Self::InvalidPropertyValue { schema_path, .. }
            | Self::AllowedValuesNotString { schema_path }
            | Self::InvalidRepeat { schema_path, .. }
            | Self::ConflictingDefaults { schema_path }
            | Self::ConflictingChecks { schema_path }
            | Self::InvalidDefaultType { schema_path, .. }
            | Self::DefaultFunctionFailed { schema_path, .. }
            | Self::ValidationFunctionFailed { schema_path, .. }
            | Self::NestingTooDeep { schema_path, .. } => Some(schema_path.as_str()),
        }
    }
}

/// One machine-readable validation problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// What went wrong.
    pub reason: String,
    /// Concrete path of the schema entry that was checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<String>,
    /// Path of the offending object position, for errors found by walking the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_path: Option<String>,
    /// Summary of the schema node that was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_node: Option<Value>,
    /// The offending value. `None` when the position is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_value: Option<Value>,
}

impl ValidationIssue {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            schema_path: None,
            object_path: None,
            schema_node: None,
            object_value: None,
        }
    }

    pub fn at_schema_path(mut self, path: impl Into<String>) -> Self {
        self.schema_path = Some(path.into());
        self
    }

    pub fn at_object_path(mut self, path: impl Into<String>) -> Self {
        self.object_path = Some(path.into());
        self
    }

    pub fn with_schema_node(mut self, node: Value) -> Self {
        self.schema_node = Some(node);
        self
    }

    pub fn with_value(mut self, value: Option<&Value>) -> Self {
        self.object_value = value.cloned();
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.schema_path.as_deref().or(self.object_path.as_deref()) {
            Some(path) if !path.is_empty() => write!(f, "  {path}: {}", self.reason),
            _ => write!(f, "  (root): {}", self.reason),
        }
    }
}

/// Accumulator of validation problems: raw issues plus a parallel list of
/// human-readable messages.
///
/// Every push adds exactly one entry to each list, so the two always have
/// the same length and line up index by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    errors: Vec<ValidationIssue>,
    user_friendly_errors: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one problem.
    pub fn push(&mut self, issue: ValidationIssue, message: impl Into<String>) {
        self.errors.push(issue);
        self.user_friendly_errors.push(message.into());
    }

    /// Returns the number of problems.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no problems.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Raw, machine-readable problems in discovery order.
    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    /// Human-readable messages, parallel to [`errors`](Self::errors).
    pub fn user_friendly_errors(&self) -> &[String] {
        &self.user_friendly_errors
    }

    /// Consumes self and returns both lists.
    pub fn into_parts(self) -> (Vec<ValidationIssue>, Vec<String>) {
        (self.errors, self.user_friendly_errors)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// The data failed validation. Carries every problem found.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", summary(.report.len()))]
pub struct SchemaValidationError {
    report: ValidationReport,
}

fn summary(count: usize) -> String {
    if count == 1 {
        "There was 1 validation error".to_string()
    } else {
        format!("There were {count} validation errors")
    }
}

impl SchemaValidationError {
    pub fn new(report: ValidationReport) -> Self {
        Self { report }
    }

    /// Number of problems.
    pub fn count(&self) -> usize {
        self.report.len()
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        self.report.errors()
    }

    pub fn user_friendly_errors(&self) -> &[String] {
        self.report.user_friendly_errors()
    }

    pub fn into_report(self) -> ValidationReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report_with(n: usize) -> ValidationReport {
        let mut report = ValidationReport::new();
        for i in 0..n {
            report.push(
                ValidationIssue::new(format!("field{i} is required"))
                    .at_schema_path(format!("field{i}")),
                format!("field{i} is required"),
            );
        }
        report
    }

    #[test]
    fn test_summary_message_singular_and_plural() {
        assert_eq!(
            SchemaValidationError::new(report_with(1)).to_string(),
            "There was 1 validation error"
        );
        assert_eq!(
            SchemaValidationError::new(report_with(3)).to_string(),
            "There were 3 validation errors"
        );
    }

    #[test]
    fn test_report_lists_stay_parallel() {
        let report = report_with(2);
        assert_eq!(report.len(), 2);
        assert_eq!(report.errors().len(), report.user_friendly_errors().len());
        assert_eq!(report.user_friendly_errors()[1], "field1 is required");
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let mut report = ValidationReport::new();
        report.push(
            ValidationIssue::new("value type is \"number\" whereas the schema specifies \"string\"")
                .at_schema_path("a")
                .with_value(Some(&json!(5))),
            "invalid value for a",
        );
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["userFriendlyErrors"][0], "invalid value for a");
        assert_eq!(v["errors"][0]["schemaPath"], "a");
        assert_eq!(v["errors"][0]["objectValue"], 5);
        assert!(v["errors"][0].get("objectPath").is_none());
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::new("empty string values are not supported").at_schema_path("name");
        assert_eq!(issue.to_string(), "  name: empty string values are not supported");
        let root = ValidationIssue::new("nested too deep");
        assert!(root.to_string().contains("(root)"));
    }

    #[test]
    fn test_meta_error_schema_path() {
        let e = SchemaMetaError::ConflictingDefaults {
            schema_path: "a/b".to_string(),
        };
        assert_eq!(e.schema_path(), Some("a/b"));
        assert_eq!(SchemaMetaError::EmptySchema.schema_path(), None);
    }

    #[test]
    fn test_model_error_routing() {
        let meta: ModelError = SchemaMetaError::EmptySchema.into();
        assert!(meta.is_meta());
        assert!(meta.validation_report().is_none());

        let data: ModelError = SchemaValidationError::new(report_with(2)).into();
        assert!(!data.is_meta());
        assert_eq!(data.validation_report().map(ValidationReport::len), Some(2));
        assert_eq!(data.to_string(), "There were 2 validation errors");
    }
}
