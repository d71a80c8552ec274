//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One status line per resource with a marker and colors
//! - Command output in verbose mode
//! - A closing summary line

use crate::domain::{ActionStatus, ResourceOutcome, RunSummary};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether this is a dry-run
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if self.dry_run {
            if self.color {
                format!("{} ", "(dry-run)".cyan())
            } else {
                "(dry-run) ".to_string()
            }
        } else {
            String::new()
        }
    }

    /// Marker and description for an outcome
    fn describe(&self, outcome: &ResourceOutcome) -> (&'static str, String) {
        match &outcome.status {
            ActionStatus::Converged { command, .. } => ("✓", format!("ran {}", command)),
            ActionStatus::WouldRun { command } => ("→", format!("would run {}", command)),
            ActionStatus::Skipped { reason } => {
                let detail = match outcome.installed_version {
                    Some(ref version) => format!("{} ({})", reason, version),
                    None => reason.to_string(),
                };
                ("-", detail)
            }
            ActionStatus::Failed { error, .. } => ("✗", format!("failed: {}", error)),
        }
    }

    /// Write indented command output
    fn write_command_output(&self, text: &str, writer: &mut dyn Write) -> std::io::Result<()> {
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            if self.color {
                writeln!(writer, "      {}", line.dimmed())?;
            } else {
                writeln!(writer, "      {}", line)?;
            }
        }
        Ok(())
    }

    /// Format the closing summary line
    fn format_summary_line(
        &self,
        summary: &RunSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let changed = summary.changed_count();
        let skipped = summary.skipped_count();
        let failed = summary.failed_count();
        let changed_label = if self.dry_run { "to change" } else { "converged" };

        if self.color {
            let failed_display = if failed > 0 {
                failed.to_string().red().bold().to_string()
            } else {
                failed.to_string().dimmed().to_string()
            };
            writeln!(
                writer,
                "{}{} {} {}, {} up to date, {} failed",
                self.dry_run_prefix(),
                "Summary:".bold(),
                changed.to_string().green(),
                changed_label,
                skipped.to_string().dimmed(),
                failed_display
            )
        } else {
            writeln!(
                writer,
                "{}Summary: {} {}, {} up to date, {} failed",
                self.dry_run_prefix(),
                changed,
                changed_label,
                skipped,
                failed
            )
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, summary: &RunSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            for outcome in summary.failures() {
                self.format_outcome(outcome, writer)?;
            }
        } else {
            for outcome in &summary.resources {
                self.format_outcome(outcome, writer)?;
            }
        }

        if self.verbosity != Verbosity::Quiet || summary.has_failures() {
            self.format_summary_line(summary, writer)?;
        }
        Ok(())
    }

    fn format_outcome(
        &self,
        outcome: &ResourceOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let (marker, detail) = self.describe(outcome);
        let label = format!("{} {}", outcome.action, outcome.name);

        if self.color {
            let marker = match &outcome.status {
                ActionStatus::Converged { .. } => marker.green().bold(),
                ActionStatus::WouldRun { .. } => marker.cyan(),
                ActionStatus::Skipped { .. } => marker.dimmed(),
                ActionStatus::Failed { .. } => marker.red().bold(),
            };
            let detail = if outcome.is_failed() {
                detail.red().to_string()
            } else {
                detail.dimmed().to_string()
            };
            writeln!(writer, "  {} {} {}", marker, label.bold(), detail)?;
        } else {
            writeln!(writer, "  {} {} {}", marker, label, detail)?;
        }

        if self.verbosity == Verbosity::Verbose {
            if let ActionStatus::Converged { stdout, stderr, .. } = &outcome.status {
                self.write_command_output(stdout, writer)?;
                self.write_command_output(stderr, writer)?;
            }
        }
        Ok(())
    }
}
