//! Command-line interface module for extsort.
//!
//! This module handles:
//! - Argument parsing (`-d/--directory` plus output flags)
//! - Running a single pass synchronously
//! - Printing the status lines live, or the whole report as JSON

use crate::config::OrganizeOptions;
use crate::file_organizer::{FileOrganizer, Report};
use crate::output::OutputFormatter;
use clap::{ArgAction, Parser};

/// Organize files in a directory by their extension.
#[derive(Parser, Debug, Clone)]
#[command(name = "extsort", version, about, long_about = None)]
pub struct Cli {
    /// The path to the directory you want to organize (`~` is expanded).
    #[arg(short, long, value_name = "DIRECTORY")]
    pub directory: String,

    /// Show what would be moved without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the final report as JSON instead of status lines.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the run options for this invocation.
    pub fn options(&self) -> OrganizeOptions {
        OrganizeOptions::for_current_program().with_dry_run(self.dry_run)
    }
}

/// Runs one pass as described by `cli` and prints its outcome.
///
/// Nothing here is treated as fatal: an invalid directory or files that fail
/// to move are reported and the report is returned normally.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use extsort::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["extsort", "-d", "~/Downloads"]);
/// let report = run_cli(&cli);
/// assert!(!report.is_invalid_target());
/// ```
pub fn run_cli(cli: &Cli) -> Report {
    let organizer = FileOrganizer::new(cli.options());

    if cli.json {
        let report = organizer.organize(&cli.directory);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => OutputFormatter::plain(&json),
            Err(e) => OutputFormatter::error(&format!("Could not serialize report: {}", e)),
        }
        return report;
    }

    let report = organizer.organize_with(&cli.directory, OutputFormatter::status);

    if report.dry_run && !report.is_invalid_target() {
        OutputFormatter::dry_run_notice("No files were modified.");
    } else {
        OutputFormatter::report_summary(&report);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_directory_is_required() {
        let result = Cli::try_parse_from(["extsort"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_short_and_long_directory() {
        let short = Cli::try_parse_from(["extsort", "-d", "~/Downloads"]).unwrap();
        assert_eq!(short.directory, "~/Downloads");
        assert!(!short.dry_run);
        assert!(!short.json);

        let long = Cli::try_parse_from(["extsort", "--directory", "/tmp", "--dry-run", "-vv"])
            .unwrap();
        assert_eq!(long.directory, "/tmp");
        assert!(long.dry_run);
        assert_eq!(long.verbose, 2);
    }

    #[test]
    fn test_options_follow_flags() {
        let cli = Cli::try_parse_from(["extsort", "-d", "/tmp", "--dry-run"]).unwrap();
        let options = cli.options();
        assert!(options.dry_run);
        assert!(options.self_path.is_some());
    }
}
