//! Web layer schemas: inbound requests, outbound responses and the
//! messages sent back to browser clients.

use std::sync::OnceLock;

use serde_json::Value;
use vmod_engine::{DefaultFn, DefaultOutcome, Fields, Schema, SchemaNode};

use crate::enums::{HttpResponseType, MessageLevel};

/// A request received by the web server.
pub fn http_request() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::object(
            Fields::new()
                .field("request_id", SchemaNode::string())
                .field(
                    "request_values",
                    Fields::new()
                        // Chunked bodies arrive as arrays.
                        .field("body", SchemaNode::any())
                        .field("cookies", SchemaNode::simple_object())
                        .field("headers", SchemaNode::simple_object())
                        .field("query_string_values", SchemaNode::simple_object())
                        .field("raw_request", SchemaNode::simple_object()),
                )
                .field(
                    "route",
                    Fields::new()
                        .field("component_domain", SchemaNode::string())
                        .field("component_root_url", SchemaNode::string())
                        .field("custom_domain", SchemaNode::string())
                        .field("file_friendly_route", SchemaNode::string())
                        .field("raw_url", SchemaNode::string())
                        .field("url", SchemaNode::string()),
                ),
        )
    })
}

/// A response returned by the web server. The content type and file
/// extension default from `response_type`.
pub fn http_response() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::object(
            Fields::new()
                .field("allow_cross_origin", SchemaNode::boolean())
                .field(
                    "content_type_extension",
                    SchemaNode::string().default_function(DefaultFn::new("extension", default_extension)),
                )
                .field("http_code", SchemaNode::number().required())
                .field("http_headers", SchemaNode::simple_object())
                .field("is_base64_encoded", SchemaNode::boolean())
                .field(
                    "response_content_type",
                    SchemaNode::string().default_function(DefaultFn::new("content_type", default_content_type)),
                )
                .field("response_data", SchemaNode::any())
                .field(
                    "response_type",
                    SchemaNode::string()
                        .allowed_values(HttpResponseType::allowed_values())
                        .required(),
                ),
        )
    })
}

/// A message for the browser client.
pub fn client_request() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::object(
            Fields::new()
                .field("data", SchemaNode::simple_object())
                .field("id", SchemaNode::string())
                .field("message", SchemaNode::string())
                .field("message_heading", SchemaNode::string())
                .field(
                    "message_level",
                    SchemaNode::string().allowed_values(MessageLevel::allowed_values()),
                )
                .field("request_code", SchemaNode::string()),
        )
    })
}

fn response_type(base: &Value) -> Option<HttpResponseType> {
    base.get("response_type")?.as_str()?.parse().ok()
}

fn default_content_type(_: Option<&Value>, _: &SchemaNode, base: &Value) -> DefaultOutcome {
    match response_type(base) {
        Some(kind) => match kind.content_type() {
            Some(mime) => DefaultOutcome::Value(Value::from(mime)),
            None => DefaultOutcome::Unset,
        },
        None => DefaultOutcome::Value(Value::from("unknown")),
    }
}

fn default_extension(_: Option<&Value>, _: &SchemaNode, base: &Value) -> DefaultOutcome {
    match response_type(base).and_then(|kind| kind.extension()) {
        Some(extension) => DefaultOutcome::Value(Value::from(extension)),
        None => DefaultOutcome::Unset,
    }
}
