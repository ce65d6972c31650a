//! End-to-end checks of the CLI library against files on disk.

use std::path::Path;

use serde_json::Value;
use vmod_cli::config::Config;
use vmod_cli::validate::{validate_to, ValidateArgs};

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn validate(schema: &str, document: &Path, config: &Config) -> (u8, String) {
    let args = ValidateArgs {
        schema: schema.to_string(),
        compact: false,
        report: false,
        document: document.to_path_buf(),
    };
    let mut out = Vec::new();
    let code = validate_to(&args, config, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn yaml_document_with_catalog_schema() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "order.yaml",
        "id:\n  type: string\n  required: true\nlines:\n  - sku:\n      type: string\n      required: true\n    qty:\n      type: number\n      defaultValue: 1\n",
    );
    let config_path = write(dir.path(), "vmod.yaml", "max_depth: 16\nschemas:\n  order: order.yaml\n");
    let config = Config::load(Some(&config_path)).unwrap();

    let doc = write(dir.path(), "o1.yaml", "id: o1\nlines:\n  - sku: A\n  - sku: B\n    qty: 4\n");
    let (code, out) = validate("order", &doc, &config);
    assert_eq!(code, 0);
    let model: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(model["lines"][0]["qty"], 1);
    assert_eq!(model["lines"][1]["qty"], 4);
}

#[test]
fn every_element_is_checked() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write(
        dir.path(),
        "contact.json",
        r#"{"id": "c1", "name": "Ana", "email": [{"value": "a@x"}, {"label": "work"}]}"#,
    );
    let (code, out) = validate("contact", &doc, &Config::default());
    assert_eq!(code, 1);
    assert!(out.contains("  email/value is required\n"));
}

#[test]
fn depth_limit_from_config_applies() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write(dir.path(), "vmod.yaml", "max_depth: 3\n");
    let config = Config::load(Some(&config_path)).unwrap();
    let doc = write(
        dir.path(),
        "req.json",
        r#"{"id": "c1", "name": "Ana", "work_details": {"company": {"deep": {"er": 1}}}}"#,
    );
    let (code, out) = validate("contact", &doc, &config);
    assert_eq!(code, 1);
    assert!(out.contains("There was 1 validation error"));
}
