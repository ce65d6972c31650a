//! Document loading: JSON, or YAML converted into the equivalent JSON tree.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

/// True if the path carries a YAML extension.
pub fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Read a document from disk. `.yaml`/`.yml` files are parsed as YAML,
/// everything else as JSON.
pub fn read_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(&text, is_yaml(path)).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse document text.
pub fn parse_document(text: &str, yaml: bool) -> Result<Value> {
    if yaml {
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        yaml_to_json_value(&value)
    } else {
        Ok(serde_json::from_str(text)?)
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Documents use only the JSON-compatible subset of YAML. Tags are dropped;
/// mapping keys must be scalars.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| anyhow!("cannot represent number {n} in JSON"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(anyhow!("unsupported YAML map key: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
