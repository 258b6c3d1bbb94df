//! `scatt report` - analyze a directory of projects

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::output::{Output, OutputFormat};
use crate::report::Report;
use crate::storage::{self, analyze_all, find_projects, write_report, Config, Sb2Loader};

pub fn run(
    output: &Output,
    format: Option<OutputFormat>,
    dir: &Path,
    dest: Option<PathBuf>,
    to_stdout: bool,
) -> Result<()> {
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let config = Config::load(Some(dir))?;
    let output = output.with_format(format.unwrap_or_else(|| config.report.default_format.into()));

    let paths = find_projects(dir, config.extension())?;
    output.verbose_ctx(
        "report",
        &format!("Found {} .{} file(s) in {}", paths.len(), config.extension(), dir.display()),
    );

    let loader = Sb2Loader::new(config.analysis.manifest_name.as_str());
    let analyses = analyze_all(&paths, &loader);

    let report = Report::from_analyses(Some(dir.display().to_string()), &analyses);
    let failed = report.failed_count();

    let contents = if output.is_json() {
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    } else {
        report.to_text()
    };

    if to_stdout {
        print!("{}", contents);
        return Ok(());
    }

    let dest = match dest {
        Some(dest) => dest,
        None => {
            let format = if output.is_json() {
                storage::OutputFormat::Json
            } else {
                storage::OutputFormat::Text
            };
            config.report_path(dir, format)?
        }
    };
    output.verbose_ctx("report", &format!("Writing report to {}", dest.display()));
    write_report(&dest, &contents)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "report": dest.display().to_string(),
            "projects": report.projects.len(),
            "failed": failed,
        }));
    } else {
        output.success(&format!(
            "Wrote report for {} project(s) ({} failed) to {}",
            report.projects.len(),
            failed,
            dest.display()
        ));
    }

    Ok(())
}
