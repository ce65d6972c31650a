//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! max_depth: 64
//! schemas:
//!   invoice: schemas/invoice.yaml
//!   customer: /srv/schemas/customer.json
//! ```
//!
//! Relative catalog paths resolve against the directory holding the
//! configuration file. Without `--config`, built-in schemas and explicit
//! schema file paths remain available.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use vmod_engine::{GenerateOptions, DEFAULT_MAX_DEPTH};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Deepest nesting accepted in documents and schemas.
    pub max_depth: usize,
    /// Named schema documents.
    pub schemas: BTreeMap<String, PathBuf>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            schemas: BTreeMap::new(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load the configuration file, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config = Self::from_yaml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Parse configuration text. Relative catalog paths resolve against the
    /// current directory until a base directory is set by [`load`](Self::load).
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        if config.max_depth == 0 {
            anyhow::bail!("max_depth must be at least 1");
        }
        Ok(config)
    }

    /// Generation options derived from this configuration.
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            max_depth: self.max_depth,
        }
    }

    /// Resolved file path of a catalogued schema.
    pub fn schema_path(&self, name: &str) -> Option<PathBuf> {
        self.schemas
            .get(name)
            .map(|path| crate::resolve_path(path, &self.base_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.schemas.is_empty());
    }

    #[test]
    fn catalog_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vmod.yaml");
        std::fs::write(&path, "max_depth: 32\nschemas:\n  invoice: schemas/invoice.yaml\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.options().max_depth, 32);
        assert_eq!(
            config.schema_path("invoice"),
            Some(dir.path().join("schemas/invoice.yaml"))
        );
        assert_eq!(config.schema_path("missing"), None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_yaml("max_dept: 3\n").is_err());
    }

    #[test]
    fn zero_depth_is_rejected() {
        assert!(Config::from_yaml("max_depth: 0\n").is_err());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Config::load(Some(Path::new("/nonexistent/vmod.yaml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/vmod.yaml"));
    }
}
