//! # Schemas Subcommand
//!
//! Lists the schema names `vmod validate --schema` accepts.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::config::Config;

/// Arguments for the schemas subcommand.
#[derive(Args, Debug)]
pub struct SchemasArgs {
    /// Also print each catalogued schema's resolved file path.
    #[arg(long)]
    pub paths: bool,
}

/// Execute the schemas subcommand, writing to stdout.
pub fn run_schemas(args: &SchemasArgs, config: &Config) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    list_schemas(args, config, &mut out)?;
    Ok(0)
}

/// Write the built-in names, then the catalog names.
pub fn list_schemas(args: &SchemasArgs, config: &Config, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Built-in schemas:")?;
    for name in vmod_schemas::BUILTIN_SCHEMAS {
        writeln!(out, "  {name}")?;
    }

    if config.schemas.is_empty() {
        return Ok(());
    }
    writeln!(out, "Catalog schemas:")?;
    for name in config.schemas.keys() {
        if vmod_schemas::builtin(name).is_some() {
            tracing::warn!(schema = %name, "catalog entry is shadowed by a built-in schema");
        }
        match (args.paths, config.schema_path(name)) {
            (true, Some(path)) => writeln!(out, "  {name}  {}", path.display())?,
            _ => writeln!(out, "  {name}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(args: &SchemasArgs, config: &Config) -> String {
        let mut out = Vec::new();
        list_schemas(args, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_builtins() {
        let out = list(&SchemasArgs { paths: false }, &Config::default());
        assert!(out.starts_with("Built-in schemas:\n  authorization\n"));
        assert!(out.contains("  workflow_job\n"));
        assert!(!out.contains("Catalog"));
    }

    #[test]
    fn lists_catalog_with_paths() {
        let config = Config::from_yaml("schemas:\n  invoice: /srv/invoice.yaml\n").unwrap();
        let out = list(&SchemasArgs { paths: true }, &config);
        assert!(out.contains("Catalog schemas:\n  invoice  /srv/invoice.yaml\n"));
    }
}
