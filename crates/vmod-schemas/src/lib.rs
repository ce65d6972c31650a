//! # vmod-schemas: Built-in Schemas
//!
//! The schemas the surrounding application validates its own models with.
//! Each is built once on first use and shared as `&'static Schema`.
//!
//! | Name | Models |
//! |------|--------|
//! | `session` | A stored user session |
//! | `authorization` | The outcome of authorizing a request |
//! | `http_request` | A request received by the web server |
//! | `http_response` | A response returned by the web server |
//! | `client_request` | A message for the browser client |
//! | `workflow_job` | A unit of work for a workflow step |
//! | `contact` | Worked example using every schema feature |

pub mod contact;
pub mod enums;
pub mod session;
pub mod web;
pub mod workflow;

use vmod_engine::Schema;

pub use contact::contact;
pub use enums::{HttpCode, HttpResponseType, MessageLevel, UnknownVariant, WorkflowRequestOrigin};
pub use session::{authorization, session};
pub use web::{client_request, http_request, http_response};
pub use workflow::workflow_job;

/// Names accepted by [`builtin`], in listing order.
pub const BUILTIN_SCHEMAS: [&str; 7] = [
    "authorization",
    "client_request",
    "contact",
    "http_request",
    "http_response",
    "session",
    "workflow_job",
];

/// Look up a built-in schema by name.
pub fn builtin(name: &str) -> Option<&'static Schema> {
    match name {
        "authorization" => Some(authorization()),
        "client_request" => Some(client_request()),
        "contact" => Some(contact()),
        "http_request" => Some(http_request()),
        "http_response" => Some(http_response()),
        "session" => Some(session()),
        "workflow_job" => Some(workflow_job()),
        _ => None,
    }
}
