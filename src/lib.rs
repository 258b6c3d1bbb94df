//! Scatt - Structural metrics for archived Scratch 2 projects
//!
//! Reads the `project.json` manifest out of each `.sb2` archive, models its
//! stage, sprites and scripts, and reports script counts and lengths per
//! sprite for grading or auditing student work.

pub mod domain;
pub mod storage;
pub mod report;
pub mod cli;

pub use domain::{ErrorState, ModelError, ParseError, ProjectAnalysis, ProjectModel, Script};
