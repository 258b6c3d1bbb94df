//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `report [DIR]` | Analyze every `.sb2` in DIR and write `<dirname>_report.txt` |
//! | `inspect FILE` | Print one project's metrics |
//! | `sprites FILE [--sprite NAME]` | List sprites, or one sprite's scripts |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `report.default_format` in `scatt.toml`.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! scatt --verbose report submissions/
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod logging;
mod report_cmd;
mod inspect;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
