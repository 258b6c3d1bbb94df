//! Manifest loading boundary
//!
//! The project model never touches archives itself; it asks a
//! [`ManifestLoader`] for the manifest text and records how that went.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("No '{entry}' entry found in {}", .path.display())]
    NoManifest { path: PathBuf, entry: String },
}

impl LoadError {
    /// Builds an I/O failure for `path`
    pub fn io(path: &Path, err: impl std::fmt::Display) -> Self {
        LoadError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Supplies the raw manifest text of a project file
pub trait ManifestLoader {
    /// Returns the manifest text, distinguishing an unreadable file from a
    /// readable one that has no manifest
    fn load_manifest_text(&self, path: &Path) -> Result<String, LoadError>;
}

impl<F> ManifestLoader for F
where
    F: Fn(&Path) -> Result<String, LoadError>,
{
    fn load_manifest_text(&self, path: &Path) -> Result<String, LoadError> {
        self(path)
    }
}
