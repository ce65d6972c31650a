//! # Validate Subcommand
//!
//! Runs a document through model generation and prints the result.
//!
//! The schema argument is resolved in order: a built-in schema name, a
//! name from the configuration catalog, then a path to a JSON or YAML
//! schema document.
//!
//! Exit codes: 0 when the model was generated, 1 when the document failed
//! validation. Unreadable inputs and malformed schemas are returned as
//! errors and exit 2.

use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use vmod_engine::{generate_with, ModelError, Schema};

use crate::config::Config;
use crate::document::read_document;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Built-in schema name, catalog name, or path to a schema document.
    #[arg(long, short)]
    pub schema: String,

    /// Print the generated model on a single line.
    #[arg(long)]
    pub compact: bool,

    /// On failure, print the full validation report as JSON.
    #[arg(long)]
    pub report: bool,

    /// JSON or YAML document to validate.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,
}

/// Execute the validate subcommand, writing to stdout.
pub fn run_validate(args: &ValidateArgs, config: &Config) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    validate_to(args, config, &mut out)
}

/// Execute the validate subcommand, writing results to `out`.
pub fn validate_to(args: &ValidateArgs, config: &Config, out: &mut impl Write) -> Result<u8> {
    let schema = load_schema(&args.schema, config)?;
    let document = read_document(&args.document)?;

    tracing::info!(
        schema = %args.schema,
        document = %args.document.display(),
        max_depth = config.max_depth,
        "validating document"
    );

    match generate_with(&document, &schema, &config.options()) {
        Ok(model) => {
            write_model(out, &model, args.compact)?;
            Ok(0)
        }
        Err(ModelError::Validation(e)) => {
            tracing::info!(errors = e.count(), "document failed validation");
            if args.report {
                serde_json::to_writer_pretty(&mut *out, e.report())?;
                writeln!(out)?;
            } else {
                writeln!(out, "FAIL: {}: {e}", args.document.display())?;
                for message in e.user_friendly_errors() {
                    writeln!(out, "  {message}")?;
                }
            }
            Ok(1)
        }
        Err(ModelError::SchemaMeta(e)) => {
            Err(e).with_context(|| format!("schema {} is malformed", args.schema))
        }
    }
}

/// Resolve a schema argument to a schema.
pub fn load_schema(name: &str, config: &Config) -> Result<Cow<'static, Schema>> {
    if let Some(schema) = vmod_schemas::builtin(name) {
        tracing::debug!(schema = name, "using built-in schema");
        return Ok(Cow::Borrowed(schema));
    }

    let path = match config.schema_path(name) {
        Some(path) => path,
        None => PathBuf::from(name),
    };
    if !path.exists() {
        anyhow::bail!(
            "unknown schema {name:?}: not a built-in schema, catalog entry or file (see `vmod schemas`)"
        );
    }
    load_schema_file(&path, config).map(Cow::Owned)
}

fn load_schema_file(path: &Path, config: &Config) -> Result<Schema> {
    let document = read_document(path)?;
    let schema = Schema::from_json_with(&document, &config.options())
        .with_context(|| format!("invalid schema document {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded schema document");
    Ok(schema)
}

fn write_model(out: &mut impl Write, model: &Value, compact: bool) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut *out, model)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, model)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(schema: &str, document: &Path) -> ValidateArgs {
        ValidateArgs {
            schema: schema.to_string(),
            compact: true,
            report: false,
            document: document.to_path_buf(),
        }
    }

    fn run(args: &ValidateArgs, config: &Config) -> (Result<u8>, String) {
        let mut out = Vec::new();
        let result = validate_to(args, config, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn builtin_schema_prints_model() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("contact.json");
        std::fs::write(&doc, r#"{"id": "c1", "name": "Ana"}"#).unwrap();

        let (result, out) = run(&args("contact", &doc), &Config::default());
        assert_eq!(result.unwrap(), 0);
        let model: Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(model["city"], "New York");
        assert_eq!(model["record_type"], "PERSON");
    }

    #[test]
    fn failures_list_messages() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("contact.yaml");
        std::fs::write(&doc, "id: c1\nname: Ana\nrecord_type: ROBOT\n").unwrap();

        let (result, out) = run(&args("contact", &doc), &Config::default());
        assert_eq!(result.unwrap(), 1);
        assert!(out.starts_with("FAIL: "));
        assert!(out.contains("There was 1 validation error"));
        assert!(out.contains("  record_type must be one of \"ORGANIZATION, PERSON\""));
    }

    #[test]
    fn report_flag_prints_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("contact.json");
        std::fs::write(&doc, r#"{"name": "Ana"}"#).unwrap();

        let mut a = args("contact", &doc);
        a.report = true;
        let (result, out) = run(&a, &Config::default());
        assert_eq!(result.unwrap(), 1);
        let report: Value = serde_json::from_str(&out).unwrap();
        assert!(report.is_object());
        assert!(out.contains("id is required"));
    }

    #[test]
    fn schema_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("item.yaml");
        std::fs::write(&schema, "sku:\n  type: string\n  required: true\nqty:\n  type: number\n  defaultValue: 1\n").unwrap();
        let doc = dir.path().join("item.json");
        std::fs::write(&doc, r#"{"sku": "A-1"}"#).unwrap();

        let (result, out) = run(&args(schema.to_str().unwrap(), &doc), &Config::default());
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out.trim(), r#"{"sku":"A-1","qty":1}"#);
    }

    #[test]
    fn catalog_name_is_resolved() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("item.json"), r#"{"sku": {"type": "string", "required": true}}"#).unwrap();
        let config_path = dir.path().join("vmod.yaml");
        std::fs::write(&config_path, "schemas:\n  item: item.json\n").unwrap();
        let config = Config::load(Some(&config_path)).unwrap();

        let doc = dir.path().join("doc.json");
        std::fs::write(&doc, "{}").unwrap();
        let (result, out) = run(&args("item", &doc), &config);
        assert_eq!(result.unwrap(), 1);
        assert!(out.contains("  sku is required"));
    }

    #[test]
    fn malformed_schema_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("bad.json");
        std::fs::write(&schema, r#"{"sku": {"type": "text"}}"#).unwrap();
        let doc = dir.path().join("doc.json");
        std::fs::write(&doc, "{}").unwrap();

        let (result, _) = run(&args(schema.to_str().unwrap(), &doc), &Config::default());
        assert!(format!("{:#}", result.unwrap_err()).contains("bad.json"));
    }

    #[test]
    fn unknown_schema_is_an_error() {
        let err = load_schema("no_such_schema", &Config::default()).unwrap_err();
        assert!(err.to_string().contains("no_such_schema"));
    }

    #[test]
    fn builtin_schemas_are_borrowed() {
        assert!(matches!(
            load_schema("session", &Config::default()).unwrap(),
            Cow::Borrowed(_)
        ));
    }
}
