//! Configuration file support for uv-audit.
//!
//! Provides YAML-based configuration through `uv-audit.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "uv-audit.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub ignore: Option<Vec<IgnoreAdvisory>>,
    pub database: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, serde_yaml_ng::Value>,
}

/// An advisory to leave out of every report.
#[derive(Debug, Deserialize)]
pub struct IgnoreAdvisory {
    pub id: String,
    pub reason: Option<String>,
}

impl ConfigFile {
    /// Ignored advisory ids in file order
    pub fn ignore_ids(&self) -> Vec<String> {
        self.ignore
            .iter()
            .flatten()
            .map(|entry| entry.id.clone())
            .collect()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(path, &config);
    tracing::debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// `--config <path>` when given, otherwise discovery in `working_dir`.
pub fn load_config(explicit: Option<&Path>, working_dir: &Path) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => load_config_from_path(path).map(Some),
        None => discover_config(working_dir),
    }
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref ignore) = config.ignore {
        for (i, entry) in ignore.iter().enumerate() {
            if entry.id.trim().is_empty() {
                bail!(
                    "Invalid config: ignore[{}].id must not be empty.\n\n\
                     💡 Hint: Each ignore entry must have a non-empty 'id' field (e.g., \"PYSEC-2024-1\" or \"CVE-2024-1234\").",
                    i
                );
            }
        }
    }
    if let Some(ref format) = config.format {
        if format.trim().is_empty() {
            bail!("Invalid config: format must not be empty.");
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(path: &Path, config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(
            path = %path.display(),
            "Unknown config field '{}' will be ignored",
            key
        );
    }
}
