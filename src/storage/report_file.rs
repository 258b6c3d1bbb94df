//! Report file output
//!
//! The report is written to a temp file under an exclusive lock and then
//! renamed over the destination, so a reader never sees a partial report.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use fs2::FileExt;

/// Writes `contents` to `path` atomically
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("tmp");

    {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire write lock on report")?;

        let mut writer = BufWriter::new(&file);
        writer
            .write_all(contents.as_bytes())
            .context("Failed to write report")?;
        writer.flush().context("Failed to flush report")?;
    }

    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "report written");
    Ok(())
}
