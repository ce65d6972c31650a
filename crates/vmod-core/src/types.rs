//! # Value Type Classification
//!
//! Maps any position in a JSON value tree to one informal type tag. The
//! schema's own `type` vocabulary is drawn from the same closed set, so
//! type checks are plain enum comparisons.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The informal type of a value (or of its absence).
///
/// `Undefined` classifies a position that holds no value at all. JSON
/// `null` is a present value and classifies as `Null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Undefined,
    Null,
    Array,
    Boolean,
    String,
    Number,
    SimpleObject,
}

impl ValueType {
    /// Classify a possibly-absent value.
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => Self::Undefined,
            Some(Value::Null) => Self::Null,
            Some(Value::Array(_)) => Self::Array,
            Some(Value::Bool(_)) => Self::Boolean,
            Some(Value::String(_)) => Self::String,
            Some(Value::Number(_)) => Self::Number,
            Some(Value::Object(_)) => Self::SimpleObject,
        }
    }

    /// Classify a present value.
    pub fn of_value(value: &Value) -> Self {
        Self::of(Some(value))
    }

    /// The tag as written in schemas and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Number => "number",
            Self::SimpleObject => "simpleObject",
        }
    }

    /// True for `array` and `simpleObject`.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array | Self::SimpleObject)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
