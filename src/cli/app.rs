//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{inspect, logging, report_cmd};

#[derive(Parser)]
#[command(name = "scatt")]
#[command(author, version, about = "Structural metrics for Scratch 2 projects")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every project in a directory and write a report
    Report {
        /// Directory containing project files
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Report destination (defaults to <dir>/<dirname>_report.txt)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the report instead of writing it
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Show the metrics of a single project
    Inspect {
        /// Project file
        file: PathBuf,
    },

    /// List the sprites of a project
    Sprites {
        /// Project file
        file: PathBuf,

        /// Show the scripts of this sprite
        #[arg(long, short)]
        sprite: Option<String>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let output = Output::new(cli.format.unwrap_or_default(), cli.verbose);
    output.verbose("Scatt starting");

    match cli.command {
        Commands::Report { dir, output: dest, stdout } => {
            output.verbose_ctx("report", &format!("Analyzing directory: {}", dir.display()));
            report_cmd::run(&output, cli.format, &dir, dest, stdout)?
        }

        Commands::Inspect { file } => inspect::inspect(&output, cli.format, &file)?,

        Commands::Sprites { file, sprite } => {
            inspect::sprites(&output, cli.format, &file, sprite.as_deref())?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
