//! # vmod-cli: Command-Line Interface
//!
//! Provides the `vmod` binary, a thin collaborator around the model
//! generation engine: it reads documents and schema files from disk, runs
//! them through `vmod_engine::generate_with`, and reports the outcome.
//!
//! ## Subcommands
//!
//! - `vmod validate --schema <NAME|PATH> <DOCUMENT>`: print the generated
//!   model (exit 0), or every user-facing validation error (exit 1).
//!   Operational failures and malformed schemas exit 2.
//! - `vmod schemas`: list built-in and catalogued schema names.
//!
//! ```bash
//! vmod validate --schema http_response response.json
//! vmod --config vmod.yaml validate --schema invoice --compact invoice.yaml
//! ```

pub mod config;
pub mod document;
pub mod schemas;
pub mod validate;

use std::path::{Path, PathBuf};

/// Resolve a path that may be relative to `base_dir`.
///
/// Absolute paths are returned as is; relative paths are joined onto
/// `base_dir`.
pub fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
