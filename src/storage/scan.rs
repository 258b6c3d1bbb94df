//! Batch discovery and analysis of project files

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::{ManifestLoader, ProjectAnalysis};

/// Lists project files in `dir` with the given extension
///
/// Matching is case-insensitive on the extension. Results are sorted by
/// file name ignoring case, so the order is the same on every platform.
pub fn find_projects(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();

        let matches = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));

        if matches && path.is_file() {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| {
        let a = file_name(a);
        let b = file_name(b);
        a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(&b))
    });

    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Analyzes each project in order; a bad file never stops the batch
pub fn analyze_all(paths: &[PathBuf], loader: &impl ManifestLoader) -> Vec<ProjectAnalysis> {
    paths
        .iter()
        .map(|path| {
            tracing::debug!(path = %path.display(), "analyzing project");
            ProjectAnalysis::load(path, loader)
        })
        .collect()
}
