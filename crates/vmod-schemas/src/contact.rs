//! The contact schema: a worked example exercising every schema feature
//! (default values and functions, repeats, nested groups, allowed values
//! and a validation function).

use std::sync::OnceLock;

use serde_json::Value;
use vmod_engine::{
    DefaultFn, DefaultOutcome, Fields, Schema, SchemaNode, SchemaTree, ValidationFn,
    ValidationOutcome,
};

/// Shortest accepted `notes` value, in characters.
pub const MIN_NOTES_LEN: usize = 5;

pub fn contact() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::object(
            Fields::new()
                .field(
                    "city",
                    SchemaNode::string().default_function(DefaultFn::new("default_city", |_, _, _| {
                        DefaultOutcome::Value(Value::from("New York"))
                    })),
                )
                .field(
                    "email",
                    SchemaTree::repeat(
                        Fields::new()
                            .field("label", SchemaNode::string().default_value("example label").required())
                            .field("value", SchemaNode::string().required()),
                    ),
                )
                .field(
                    "hard_type",
                    SchemaNode::string()
                        .allowed_values("HARD_VALUE")
                        .default_value("HARD_VALUE")
                        .required(),
                )
                .field("id", SchemaNode::string().required())
                .field(
                    "name",
                    SchemaNode::string()
                        .default_function(DefaultFn::new("full_name", full_name))
                        .required(),
                )
                .field(
                    "notes",
                    SchemaNode::string().validation_function(ValidationFn::new("notes_length", notes_length)),
                )
                .field(
                    "person_name",
                    Fields::new()
                        .field("first_name", SchemaNode::string().required())
                        .field("last_name", SchemaNode::string().default_value("gentleman")),
                )
                .field(
                    "record_type",
                    SchemaNode::string()
                        .allowed_values("ORGANIZATION,PERSON")
                        .default_value("PERSON")
                        .required(),
                )
                .field("tags", SchemaTree::repeat(SchemaNode::string()))
                .field(
                    "work_details",
                    Fields::new()
                        .field("company", SchemaNode::string())
                        .field("job_title", SchemaNode::string()),
                ),
        )
    })
}

/// First and last name from `person_name`, as supplied by the caller.
fn full_name(_: Option<&Value>, _: &SchemaNode, base: &Value) -> DefaultOutcome {
    let parts: Vec<&str> = ["first_name", "last_name"]
        .iter()
        .filter_map(|key| base.get("person_name")?.get(key)?.as_str())
        .collect();
    if parts.is_empty() {
        DefaultOutcome::Unset
    } else {
        DefaultOutcome::Value(Value::from(parts.join(" ")))
    }
}

fn notes_length(value: Option<&Value>, _: &SchemaNode, _: &Value) -> ValidationOutcome {
    match value.and_then(Value::as_str) {
        Some(notes) if notes.chars().count() < MIN_NOTES_LEN => {
            ValidationOutcome::Invalid("notes are too short!".to_string())
        }
        _ => ValidationOutcome::Valid,
    }
}
