//! Single-project commands: `scatt inspect` and `scatt sprites`

use std::path::Path;

use anyhow::{bail, Result};

use super::output::{Output, OutputFormat};
use crate::domain::{ProjectAnalysis, Script};
use crate::report::ProjectSummary;
use crate::storage::{Config, Sb2Loader};

/// Loads one project using the configuration of its directory
fn analyze(
    output: &Output,
    format: Option<OutputFormat>,
    file: &Path,
) -> Result<(Output, ProjectAnalysis)> {
    let config = Config::load(file.parent())?;
    let output = output.with_format(format.unwrap_or_else(|| config.report.default_format.into()));

    output.verbose_ctx("load", &format!("Reading {}", file.display()));
    let loader = Sb2Loader::new(config.analysis.manifest_name.as_str());
    let analysis = ProjectAnalysis::load(file, &loader);

    if let Some(message) = analysis.error_message() {
        bail!("{}: {}", analysis.name(), message);
    }

    Ok((output, analysis))
}

/// Prints the metrics of one project
pub fn inspect(output: &Output, format: Option<OutputFormat>, file: &Path) -> Result<()> {
    let (output, analysis) = analyze(output, format, file)?;
    let summary = ProjectSummary::of(&analysis);

    if output.is_json() {
        output.data(&summary);
    } else {
        print!("{}", summary.to_text());
    }

    Ok(())
}

/// Lists sprites, or the scripts of one sprite
pub fn sprites(
    output: &Output,
    format: Option<OutputFormat>,
    file: &Path,
    sprite: Option<&str>,
) -> Result<()> {
    let (output, analysis) = analyze(output, format, file)?;

    match sprite {
        Some(name) => show_sprite(&output, &analysis, name),
        None => list_sprites(&output, &analysis),
    }
}

fn list_sprites(output: &Output, analysis: &ProjectAnalysis) -> Result<()> {
    let names = analysis.sprite_names();

    if output.is_json() {
        let mut items = Vec::with_capacity(names.len());
        for name in &names {
            items.push(serde_json::json!({
                "name": name,
                "scripts": analysis.script_count_for_sprite(name)?,
                "lengths": analysis.script_lengths_for_sprite(name)?,
            }));
        }
        output.data(&items);
    } else if names.is_empty() {
        println!("No sprites in {}", analysis.name());
    } else {
        println!("{:<24} {:>8} {:>8}", "SPRITE", "SCRIPTS", "BLOCKS");
        println!("{}", "-".repeat(42));
        for name in &names {
            let lengths = analysis.script_lengths_for_sprite(name)?;
            println!(
                "{:<24} {:>8} {:>8}",
                name,
                lengths.len(),
                lengths.iter().sum::<usize>()
            );
        }
    }

    Ok(())
}

fn show_sprite(output: &Output, analysis: &ProjectAnalysis, name: &str) -> Result<()> {
    let scripts = analysis.scripts_for_sprite(name)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "name": name,
            "scripts": scripts,
        }));
        return Ok(());
    }

    println!("{} ({} scripts)", name, scripts.len());
    for (index, script) in scripts.iter().enumerate() {
        println!(
            "  #{} at ({}, {}): {} blocks {}",
            index + 1,
            script.position.x,
            script.position.y,
            script.length(),
            opcodes(script)
        );
    }

    Ok(())
}

fn opcodes(script: &Script) -> String {
    let names: Vec<&str> = script
        .blocks
        .iter()
        .map(|block| block.opcode().unwrap_or("?"))
        .collect();
    format!("[{}]", names.join(", "))
}
