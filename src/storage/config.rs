//! Configuration handling for Scatt
//!
//! Configuration is read from `~/.config/scatt/config.toml` (global) and
//! from `scatt.toml` inside the analyzed directory. Keys set in the
//! directory file override the global ones; anything unset keeps its
//! default.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::archive::DEFAULT_MANIFEST_NAME;

/// Name of the per-directory configuration file
pub const LOCAL_CONFIG_FILE: &str = "scatt.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How project files are located and opened
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Extension of project files (matched case-insensitively)
    pub extension: String,

    /// Manifest entry name inside each archive
    pub manifest_name: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            extension: "sb2".to_string(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
        }
    }
}

/// How the report is written
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// Appended to the directory name to form the report file name
    /// (JSON reports swap its extension for `.json`)
    pub suffix: String,

    /// Default output format when `--format` is not given
    pub default_format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            suffix: "_report.txt".to_string(),
            default_format: OutputFormat::Text,
        }
    }
}

/// Combined configuration (global + directory)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
}

impl Config {
    /// Loads the global configuration, overlaid with `dir/scatt.toml` if present
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let global = Self::global_config_dir().map(|d| d.join("config.toml"));
        let local = dir.map(|d| d.join(LOCAL_CONFIG_FILE));
        Self::from_files(global.as_deref(), local.as_deref())
    }

    /// Loads configuration from explicit file locations; missing files are skipped
    pub fn from_files(global: Option<&Path>, local: Option<&Path>) -> Result<Self> {
        let mut merged = toml::Table::new();

        for path in [global, local].into_iter().flatten() {
            if let Some(table) = Self::read_table(path)? {
                merge_tables(&mut merged, table);
            }
        }

        let config: Config = toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))
            .context("Failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "scatt", "scatt").map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn read_table(path: &Path) -> Result<Option<toml::Table>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let table = toml::from_str::<toml::Table>(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok(Some(table))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Invalid("analysis.extension is empty".to_string()));
        }
        if self.analysis.manifest_name.is_empty() {
            return Err(ConfigError::Invalid("analysis.manifest_name is empty".to_string()));
        }
        Ok(())
    }

    /// Returns the project extension without a leading dot
    pub fn extension(&self) -> &str {
        self.analysis.extension.trim_start_matches('.')
    }

    /// Returns the default report path for a directory: `<dir>/<dirname><suffix>`
    ///
    /// The directory name comes from the resolved path, so `.` and `..`
    /// name the real directory. JSON reports get a `.json` extension in
    /// place of the suffix's own.
    pub fn report_path(&self, dir: &Path, format: OutputFormat) -> Result<PathBuf> {
        let resolved = dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve directory: {}", dir.display()))?;

        // Only a filesystem root has no name
        let dir_name = resolved
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scatt".to_string());

        Ok(dir.join(format!("{}{}", dir_name, self.report_suffix(format))))
    }

    fn report_suffix(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.report.suffix.clone(),
            OutputFormat::Json => Path::new(&self.report.suffix)
                .with_extension("json")
                .to_string_lossy()
                .into_owned(),
        }
    }
}

/// Recursively overlays `overlay` onto `base`
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
