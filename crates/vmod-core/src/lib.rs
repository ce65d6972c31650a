//! # vmod-core: Foundational Types for Model Generation
//!
//! Leaf utilities shared by every other crate in the workspace. The model
//! generation engine (`vmod-engine`) is built entirely on top of these
//! primitives; this crate depends on nothing internal.
//!
//! ## Contents
//!
//! 1. **Value type classification** (`types`). A closed `ValueType` enum
//!    replaces informal runtime type inspection. Absence is a variant
//!    (`Undefined`), not a sentinel value.
//!
//! 2. **Predicates** (`text`, `object`). Key-name validation
//!    (letters, digits, underscore) and container emptiness.
//!
//! 3. **Typed paths** (`path`). `ObjectPath` distinguishes object keys from
//!    array indices so that a key which merely looks numeric is never
//!    mistaken for an array position.
//!
//! 4. **Tree walks** (`walk`). Explicit-stack traversal with a nesting bound.
//!    No native recursion over caller-supplied data.
//!
//! 5. **Error taxonomy** (`error`). Two disjoint kinds: `SchemaMetaError`
//!    (the schema is malformed) and `SchemaValidationError` (the data does
//!    not conform), joined under `ModelError`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vmod-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod object;
pub mod path;
pub mod text;
pub mod types;
pub mod walk;

pub use error::{
    ModelError, SchemaMetaError, SchemaValidationError, ValidationIssue, ValidationReport,
};
pub use object::{is_empty, is_leaf};
pub use path::{insert, lookup, ObjectPath, PathSegment};
pub use text::is_alphanumeric_inc_underscore;
pub use types::ValueType;
pub use walk::{leaves, DepthExceeded, Leaf};
