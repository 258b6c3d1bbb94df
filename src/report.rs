//! Report assembly
//!
//! Summarizes a batch of [`ProjectAnalysis`] results. Failed projects keep
//! their name and error message in place of metrics.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ErrorState, ProjectAnalysis, Script, SpriteNode};

/// Script count and per-script lengths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptSummary {
    pub count: usize,
    pub lengths: Vec<usize>,
}

impl ScriptSummary {
    fn of(scripts: &[Script]) -> Self {
        Self {
            count: scripts.len(),
            lengths: scripts.iter().map(Script::length).collect(),
        }
    }

    /// Total top-level blocks across all scripts
    pub fn total_blocks(&self) -> usize {
        self.lengths.iter().sum()
    }
}

/// One sprite's metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpriteSummary {
    pub name: String,
    #[serde(flatten)]
    pub scripts: ScriptSummary,
}

/// One project's metrics, or its error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub status: ErrorState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    pub global_variables: usize,
    pub global_lists: usize,
    pub stage: ScriptSummary,
    pub sprites: Vec<SpriteSummary>,
}

impl ProjectSummary {
    /// Summarizes one analysis
    pub fn of(analysis: &ProjectAnalysis) -> Self {
        let sprites: Vec<SpriteSummary> = analysis
            .model()
            .map(|model| {
                model
                    .sprites()
                    .iter()
                    .map(|node: &SpriteNode| SpriteSummary {
                        name: node.name().to_string(),
                        scripts: ScriptSummary::of(node.scripts()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: analysis.name().to_string(),
            status: analysis.error_state(),
            error: analysis.error_message(),
            fingerprint: analysis.fingerprint().map(str::to_string),
            global_variables: analysis.global_variable_count(),
            global_lists: analysis.global_list_count(),
            stage: ScriptSummary::of(analysis.stage_scripts()),
            sprites,
        }
    }

    /// Returns true if the project could not be analyzed
    pub fn is_failed(&self) -> bool {
        self.status != ErrorState::None
    }

    /// Renders this project's section of the text report
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "== {} ==", self.name)?;

        if let Some(error) = &self.error {
            return writeln!(out, "ERROR: {}", error);
        }

        writeln!(out, "Global variables: {}", self.global_variables)?;
        writeln!(out, "Global lists: {}", self.global_lists)?;
        writeln!(
            out,
            "Stage scripts: {} {:?}",
            self.stage.count, self.stage.lengths
        )?;
        writeln!(out, "Sprites: {}", self.sprites.len())?;
        for sprite in &self.sprites {
            writeln!(
                out,
                "  {}: {} {} {:?}",
                sprite.name,
                sprite.scripts.count,
                plural(sprite.scripts.count, "script", "scripts"),
                sprite.scripts.lengths
            )?;
        }
        if let Some(fingerprint) = &self.fingerprint {
            writeln!(out, "Fingerprint: {}", fingerprint)?;
        }
        Ok(())
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// A report over a batch of projects
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub projects: Vec<ProjectSummary>,
    pub duplicates: Vec<Vec<String>>,
}

impl Report {
    /// Builds a report, keeping the input order of projects
    pub fn from_analyses(source: Option<String>, analyses: &[ProjectAnalysis]) -> Self {
        let projects: Vec<_> = analyses.iter().map(ProjectSummary::of).collect();
        let duplicates = duplicate_groups(&projects);

        Self {
            generated_at: Utc::now(),
            source,
            projects,
            duplicates,
        }
    }

    /// Number of projects that failed to load
    pub fn failed_count(&self) -> usize {
        self.projects.iter().filter(|p| p.is_failed()).count()
    }

    /// Renders the human-readable report
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "Scatt report")?;
        writeln!(out, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        if let Some(source) = &self.source {
            writeln!(out, "Source: {}", source)?;
        }
        writeln!(
            out,
            "Projects: {} ({} failed)",
            self.projects.len(),
            self.failed_count()
        )?;

        for project in &self.projects {
            writeln!(out)?;
            project.write_text(out)?;
        }

        if !self.duplicates.is_empty() {
            writeln!(out)?;
            writeln!(out, "Identical manifests:")?;
            for group in &self.duplicates {
                writeln!(out, "  {}", group.join(", "))?;
            }
        }

        Ok(())
    }
}

/// Groups project names whose manifests hash identically
fn duplicate_groups(projects: &[ProjectSummary]) -> Vec<Vec<String>> {
    let mut by_fingerprint: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for project in projects {
        if let Some(fingerprint) = &project.fingerprint {
            by_fingerprint
                .entry(fingerprint.as_str())
                .or_default()
                .push(project.name.clone());
        }
    }

    by_fingerprint
        .into_values()
        .filter(|names| names.len() > 1)
        .collect()
}
