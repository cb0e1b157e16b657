//! Output formatting and styling module.
//!
//! Provides a centralized interface for all shell output: colored status
//! lines, the busy spinner, and the per-folder summary table.

use crate::file_organizer::{Report, StatusMessage};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::time::Duration;

/// Manages all shell output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - Status lines emitted by an organizing pass
/// - A spinner shown while a pass runs
/// - Summary tables with statistics
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use extsort::output::OutputFormatter;
    /// OutputFormatter::success("Files have been successfully organized.");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Styles a status line according to what it reports.
    pub fn render_status(message: &StatusMessage) -> String {
        let text = message.to_string();
        match message {
            StatusMessage::Scanning { .. } => text.cyan().to_string(),
            StatusMessage::InvalidTarget { .. }
            | StatusMessage::ScanFailed { .. }
            | StatusMessage::MoveFailed { .. } => format!("{} {}", "✗".red(), text.red()),
            StatusMessage::SkippedNoExtension { .. } => format!("{} {}", "⚠".yellow(), text),
            StatusMessage::FolderCreated { .. } => format!("{} {}", "✓".green(), text),
            StatusMessage::WouldMove { .. } => format!("[DRY RUN] {}", text).yellow().to_string(),
            StatusMessage::Complete => format!("\n{}", text.bold()),
        }
    }

    /// Prints a status line; failures go to stderr.
    pub fn status(message: &StatusMessage) {
        let line = Self::render_status(message);
        if message.is_error() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    /// Creates a ticking spinner used as the busy indicator.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use extsort::output::OutputFormatter;
    /// let spinner = OutputFormatter::create_spinner("Processing Downloads...");
    /// spinner.println("Created folder 'PDF Files' for *.pdf files.");
    /// spinner.finish_and_clear();
    /// ```
    pub fn create_spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Prints a summary table with moved-file counts per folder.
    ///
    /// # Arguments
    ///
    /// * `folder_counts` - Folder names mapped to the number of files moved into them
    /// * `total_files` - Total number of files moved
    pub fn summary_table(folder_counts: &BTreeMap<String, usize>, total_files: usize) {
        Self::header("SUMMARY");

        let max_folder_len = folder_counts
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max(6); // At least "Folder" width

        println!(
            "{:<width$} | {}",
            "Folder".bold(),
            "Files".bold(),
            width = max_folder_len
        );
        println!("{}", "-".repeat(max_folder_len + 10));

        for (folder, count) in folder_counts {
            println!(
                "{:<width$} | {} {}",
                folder,
                count.to_string().green(),
                plural(*count),
                width = max_folder_len
            );
        }

        println!("{}", "-".repeat(max_folder_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            plural(total_files),
            width = max_folder_len
        );
    }

    /// Prints the summary table for a finished report, unless nothing moved.
    pub fn report_summary(report: &Report) {
        if report.moved.is_empty() {
            return;
        }
        Self::summary_table(&report.folder_counts(), report.moved.len());
        if report.failed > 0 {
            Self::warning(&format!(
                "{} {} could not be moved. Please review errors above.",
                report.failed,
                plural(report.failed)
            ));
        }
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_render_status_keeps_message_text() {
        colored::control::set_override(false);

        let message = StatusMessage::MoveFailed {
            name: "a.txt".to_string(),
            error: "denied".to_string(),
        };
        assert_eq!(
            OutputFormatter::render_status(&message),
            "✗ Could not move 'a.txt'. Error: denied"
        );

        let scanning = StatusMessage::Scanning {
            directory: PathBuf::from("/tmp/x"),
        };
        assert_eq!(
            OutputFormatter::render_status(&scanning),
            "Scanning directory: /tmp/x"
        );

        let planned = StatusMessage::WouldMove {
            name: "a.txt".to_string(),
            folder: "TXT Files".to_string(),
        };
        assert_eq!(
            OutputFormatter::render_status(&planned),
            "[DRY RUN] Would move 'a.txt' to 'TXT Files/'."
        );
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(0), "files");
        assert_eq!(plural(1), "file");
        assert_eq!(plural(2), "files");
    }
}
