//! Project archive loading
//!
//! An `.sb2` file is a zip archive whose `project.json` entry is the
//! manifest. Unpacked manifests (`*.json`) are read as-is.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::domain::{LoadError, ManifestLoader};

/// Default manifest entry name inside an archive
pub const DEFAULT_MANIFEST_NAME: &str = "project.json";

/// Loads manifests from `.sb2` archives
#[derive(Debug, Clone)]
pub struct Sb2Loader {
    manifest_name: String,
}

impl Default for Sb2Loader {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_NAME)
    }
}

impl Sb2Loader {
    /// Creates a loader reading the given entry name
    pub fn new(manifest_name: impl Into<String>) -> Self {
        Self {
            manifest_name: manifest_name.into(),
        }
    }

    /// Returns the manifest entry name
    pub fn manifest_name(&self) -> &str {
        &self.manifest_name
    }

    fn read_archive(&self, path: &Path) -> Result<String, LoadError> {
        let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
        let mut archive = ZipArchive::new(file).map_err(|e| LoadError::io(path, e))?;

        // Some tools nest the manifest one directory down
        let entry = match archive.index_for_name(&self.manifest_name) {
            Some(index) => index,
            None => self
                .nested_entry(&archive)
                .ok_or_else(|| LoadError::NoManifest {
                    path: path.to_path_buf(),
                    entry: self.manifest_name.clone(),
                })?,
        };

        let mut bytes = Vec::new();
        archive
            .by_index(entry)
            .map_err(|e| match e {
                ZipError::FileNotFound => LoadError::NoManifest {
                    path: path.to_path_buf(),
                    entry: self.manifest_name.clone(),
                },
                other => LoadError::io(path, other),
            })?
            .read_to_end(&mut bytes)
            .map_err(|e| LoadError::io(path, e))?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read manifest");

        // Invalid UTF-8 is left for the JSON parser to reject
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn nested_entry(&self, archive: &ZipArchive<File>) -> Option<usize> {
        let suffix = format!("/{}", self.manifest_name);
        let name = archive.file_names().find(|name| name.ends_with(&suffix))?;
        archive.index_for_name(name)
    }
}

impl ManifestLoader for Sb2Loader {
    fn load_manifest_text(&self, path: &Path) -> Result<String, LoadError> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))
        } else {
            self.read_archive(path)
        }
    }
}
