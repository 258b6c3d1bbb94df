//! # Storage Layer
//!
//! Everything that touches the filesystem: reading project archives,
//! finding them in a directory, loading configuration and writing the
//! report.
//!
//! ## Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Projects | Zip archive with a `project.json` entry | `<dir>/*.sb2` |
//! | Config | TOML | `~/.config/scatt/config.toml`, `<dir>/scatt.toml` |
//! | Report | Plain text or JSON | `<dir>/<dirname>_report.txt` (`.json` for JSON) |
//!
//! ## Key Types
//!
//! - [`Sb2Loader`] - [`ManifestLoader`](crate::domain::ManifestLoader) for `.sb2` archives
//! - [`Config`] - Global and per-directory configuration
//! - [`find_projects`] / [`analyze_all`] - Sequential batch processing
//! - [`write_report`] - Atomic report output

mod archive;
mod config;
mod scan;
mod report_file;

pub use archive::{Sb2Loader, DEFAULT_MANIFEST_NAME};
pub use config::{AnalysisConfig, Config, ConfigError, OutputFormat, ReportConfig, LOCAL_CONFIG_FILE};
pub use scan::{analyze_all, find_projects};
pub use report_file::write_report;
