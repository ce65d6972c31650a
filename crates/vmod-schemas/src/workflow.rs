//! Workflow job schema.

use std::sync::OnceLock;

use vmod_engine::{Fields, Schema, SchemaNode};

use crate::enums::WorkflowRequestOrigin;

/// A unit of work queued for a workflow step.
pub fn workflow_job() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::object(
            Fields::new()
                .field("key_name", SchemaNode::string())
                .field(
                    "origin",
                    SchemaNode::string()
                        .allowed_values(WorkflowRequestOrigin::allowed_values())
                        .required(),
                )
                .field("request_data", SchemaNode::simple_object())
                .field("request_id", SchemaNode::string().required())
                .field("step_data", SchemaNode::any()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_data_accepts_arrays() {
        let job = json!({
            "origin": "SCHEDULED_EVENT",
            "request_id": "r-1",
            "step_data": [{"n": 1}, {"n": 2}]
        });
        assert_eq!(workflow_job().generate(&job).unwrap(), job);
    }

    #[test]
    fn test_unknown_origin() {
        let err = workflow_job()
            .generate(&json!({"origin": "CRON", "request_id": "r-1"}))
            .unwrap_err();
        assert_eq!(
            err.validation_report().unwrap().user_friendly_errors(),
            ["origin must be one of \"BROWSER, SCHEDULED_EVENT\""]
        );
    }
}
