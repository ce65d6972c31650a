//! Session and authorization schemas.

use std::sync::OnceLock;

use vmod_engine::{Fields, Schema, SchemaNode};

/// A stored user session.
pub fn session() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::object(
            Fields::new()
                .field("data", SchemaNode::simple_object())
                .field("date_created", SchemaNode::string().required())
                .field("id", SchemaNode::string().required())
                .field("user", SchemaNode::simple_object()),
        )
    })
}

/// The outcome of authorizing a request. Embeds the session schema.
pub fn authorization() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::object(
            Fields::new()
                .field("allow_unauthenticated_reason", SchemaNode::string())
                .field("authenticated", SchemaNode::boolean())
                .field("authorization_fail_reason", SchemaNode::string())
                .field("authorized", SchemaNode::boolean().required())
                .field("cookie", SchemaNode::string())
                .field("session", session().clone()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_requires_id_and_date() {
        let err = session().generate(&json!({"user": {"name": "ana"}})).unwrap_err();
        assert_eq!(
            err.validation_report().unwrap().user_friendly_errors(),
            ["date_created is required", "id is required"]
        );
    }

    #[test]
    fn test_authorization_without_session() {
        let model = authorization()
            .generate(&json!({"authorized": false, "authorization_fail_reason": "no cookie"}))
            .unwrap();
        assert_eq!(model["authorized"], false);
    }

    #[test]
    fn test_authorization_with_partial_session() {
        let err = authorization()
            .generate(&json!({"authorized": true, "session": {"id": "s1"}}))
            .unwrap_err();
        assert_eq!(
            err.validation_report().unwrap().user_friendly_errors(),
            ["date_created is required"]
        );
    }
}
