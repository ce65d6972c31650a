//! # vmod-engine: Schema-Driven Model Generation
//!
//! Validates an arbitrary JSON value (the base object) against a declarative
//! [`Schema`] and returns a default-filled copy (the model), or reports every
//! mismatch between the data's shape and the schema's declared shape.
//!
//! ## Pipeline
//!
//! One call to [`generate`] runs, in order:
//!
//! 1. **Meta-validation** (`meta`). Schema root, key names, node properties
//!    and mutually exclusive pairs. A malformed schema fails the call with a
//!    `SchemaMetaError` before any data is touched.
//! 2. **Clone** (`clone`). The base object is deep-copied; `_id` values are
//!    normalized to strings in the copy. The caller's value is never touched.
//! 3. **Schema map** (`map`). The schema is flattened into an ordered list
//!    of entries. Entries under repeat branches are templates; each is
//!    expanded into one concrete entry per index combination the data
//!    calls for.
//! 4. **Coverage** (`coverage`). Every object leaf must be accounted for by
//!    some schema entry.
//! 5. **Resolution** (`resolve`). Per entry: default, required, allowed
//!    values, validation function, type, empty string.
//!
//! Data problems accumulate and are returned together as one
//! `SchemaValidationError`.
//!
//! ## Crate Policy
//!
//! - Pure: no I/O. Callers load documents and schemas.
//! - Walks over caller-supplied trees use explicit stacks and a depth bound.
//! - Schemas are immutable during a call and may be shared across threads.

mod clone;
mod coverage;
mod generate;
mod map;
mod meta;
mod parse;
mod resolve;
pub mod schema;

pub use generate::{generate, generate_with, GenerateOptions, DEFAULT_MAX_DEPTH};
pub use schema::{
    DefaultFn, DefaultOutcome, Fields, Schema, SchemaNode, SchemaTree, SchemaType, ValidationFn,
    ValidationOutcome, EXTENSION_PREFIX, PLACEHOLDER,
};
pub use vmod_core::{ModelError, SchemaMetaError, SchemaValidationError, ValidationIssue, ValidationReport};
