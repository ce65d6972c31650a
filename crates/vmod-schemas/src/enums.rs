//! # Enumerations
//!
//! Closed value sets referenced by the built-in schemas. Each enum's keys
//! are the wire values: `allowed_values()` produces the comma-separated
//! list a schema node expects, and serde uses the same SCREAMING_SNAKE_CASE
//! spelling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string that names no variant of the target enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Severity of a message shown to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageLevel {
    Danger,
    Info,
    Other,
    Success,
    Warning,
}

impl MessageLevel {
    pub const ALL: [MessageLevel; 5] = [
        Self::Danger,
        Self::Info,
        Self::Other,
        Self::Success,
        Self::Warning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Danger => "DANGER",
            Self::Info => "INFO",
            Self::Other => "OTHER",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
        }
    }

    /// Comma-separated list of every value.
    pub fn allowed_values() -> String {
        join(Self::ALL.iter().map(Self::as_str))
    }
}

/// Kind of payload a web response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HttpResponseType {
    Css,
    Html,
    Image,
    Javascript,
    Json,
    Other,
    Text,
}

impl HttpResponseType {
    pub const ALL: [HttpResponseType; 7] = [
        Self::Css,
        Self::Html,
        Self::Image,
        Self::Javascript,
        Self::Json,
        Self::Other,
        Self::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "CSS",
            Self::Html => "HTML",
            Self::Image => "IMAGE",
            Self::Javascript => "JAVASCRIPT",
            Self::Json => "JSON",
            Self::Other => "OTHER",
            Self::Text => "TEXT",
        }
    }

    pub fn allowed_values() -> String {
        join(Self::ALL.iter().map(Self::as_str))
    }

    /// MIME type served for this kind. `None` for `Other`, which the
    /// responder sets explicitly.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Css => Some("text/css"),
            Self::Html => Some("text/html"),
            Self::Image => Some("image/jpeg"),
            Self::Javascript => Some("application/javascript"),
            Self::Json => Some("application/json"),
            Self::Other => None,
            Self::Text => Some("text/plain"),
        }
    }

    /// File extension for this kind, including the leading dot.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Css => Some(".css"),
            Self::Html => Some(".html"),
            Self::Image => Some(".jpeg"),
            Self::Javascript => Some(".js"),
            Self::Json => Some(".json"),
            Self::Other => None,
            Self::Text => Some(".txt"),
        }
    }
}

/// Where a workflow request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowRequestOrigin {
    Browser,
    ScheduledEvent,
}

impl WorkflowRequestOrigin {
    pub const ALL: [WorkflowRequestOrigin; 2] = [Self::Browser, Self::ScheduledEvent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Browser => "BROWSER",
            Self::ScheduledEvent => "SCHEDULED_EVENT",
        }
    }

    pub fn allowed_values() -> String {
        join(Self::ALL.iter().map(Self::as_str))
    }
}

/// HTTP status codes the web layer answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HttpCode {
    Accepted,
    Created,
    Error,
    Found,
    NotFound,
    NoContent,
    Success,
    Unauthorized,
}

impl HttpCode {
    pub const ALL: [HttpCode; 8] = [
        Self::Accepted,
        Self::Created,
        Self::Error,
        Self::Found,
        Self::NotFound,
        Self::NoContent,
        Self::Success,
        Self::Unauthorized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "ACCEPTED",
            Self::Created => "CREATED",
            Self::Error => "ERROR",
            Self::Found => "FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::NoContent => "NO_CONTENT",
            Self::Success => "SUCCESS",
            Self::Unauthorized => "UNAUTHORIZED",
        }
    }

    /// Numeric status. `Error` is the application's own 540.
    pub fn code(&self) -> u16 {
        match self {
            Self::Accepted => 202,
            Self::Created => 201,
            Self::Error => 540,
            Self::Found => 302,
            Self::NotFound => 404,
            Self::NoContent => 204,
            Self::Success => 200,
            Self::Unauthorized => 401,
        }
    }
}

fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(",")
}

macro_rules! string_enum_traits {
    ($name:ident, $kind:literal) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

string_enum_traits!(MessageLevel, "message level");
string_enum_traits!(HttpResponseType, "response type");
string_enum_traits!(WorkflowRequestOrigin, "workflow origin");
string_enum_traits!(HttpCode, "http code");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_values_lists() {
        assert_eq!(MessageLevel::allowed_values(), "DANGER,INFO,OTHER,SUCCESS,WARNING");
        assert_eq!(
            HttpResponseType::allowed_values(),
            "CSS,HTML,IMAGE,JAVASCRIPT,JSON,OTHER,TEXT"
        );
        assert_eq!(WorkflowRequestOrigin::allowed_values(), "BROWSER,SCHEDULED_EVENT");
    }

    #[test]
    fn test_serde_matches_as_str() {
        for v in WorkflowRequestOrigin::ALL {
            let json = serde_json::to_value(v).unwrap();
            assert_eq!(json, serde_json::Value::from(v.as_str()));
            let back: WorkflowRequestOrigin = serde_json::from_value(json).unwrap();
            assert_eq!(back, v);
        }
        for v in HttpCode::ALL {
            assert_eq!(serde_json::to_value(v).unwrap(), serde_json::Value::from(v.as_str()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("JSON".parse::<HttpResponseType>().unwrap(), HttpResponseType::Json);
        let err = "json".parse::<HttpResponseType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown response type value: \"json\"");
    }

    #[test]
    fn test_response_type_lookups() {
        assert_eq!(HttpResponseType::Image.content_type(), Some("image/jpeg"));
        assert_eq!(HttpResponseType::Other.extension(), None);
        assert_eq!(HttpCode::Error.code(), 540);
    }
}
