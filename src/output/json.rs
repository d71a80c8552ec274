//! JSON output formatter for machine processing

use crate::domain::{ActionStatus, ResourceOutcome, RunSummary, SkipReason};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbose mode includes command output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full run
#[derive(Serialize)]
struct JsonOutput {
    /// Whether this was a dry-run
    dry_run: bool,
    /// RFC 3339 start time
    started_at: String,
    /// Wall time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<i64>,
    /// Summary statistics
    summary: JsonSummary,
    /// Per-resource results
    resources: Vec<JsonResource>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Resources that changed (or would change)
    converged: usize,
    /// Resources already in the declared state
    skipped: usize,
    /// Resources that failed
    failed: usize,
}

/// JSON representation of a single resource
#[derive(Serialize)]
struct JsonResource {
    /// Module name
    name: String,
    /// install or uninstall
    action: String,
    /// converged, would_run, skipped or failed
    status: &'static str,
    /// Version found before acting
    #[serde(skip_serializing_if = "Option::is_none")]
    installed_version: Option<String>,
    /// Command that ran or would run
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<String>,
    /// Skip reason: up_to_date or not_installed
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<SkipReason>,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Command stdout (verbose only)
    #[serde(skip_serializing_if = "Option::is_none")]
    stdout: Option<String>,
    /// Command stderr (verbose only)
    #[serde(skip_serializing_if = "Option::is_none")]
    stderr: Option<String>,
}

impl JsonFormatter {
    /// Convert a status to its JSON tag
    fn status_tag(status: &ActionStatus) -> &'static str {
        match status {
            ActionStatus::Converged { .. } => "converged",
            ActionStatus::WouldRun { .. } => "would_run",
            ActionStatus::Skipped { .. } => "skipped",
            ActionStatus::Failed { .. } => "failed",
        }
    }

    /// Convert a resource outcome to its JSON representation
    fn outcome_to_json(&self, outcome: &ResourceOutcome) -> JsonResource {
        let (stdout, stderr) = match &outcome.status {
            ActionStatus::Converged { stdout, stderr, .. }
                if self.verbosity == Verbosity::Verbose =>
            {
                (Some(stdout.clone()), Some(stderr.clone()))
            }
            _ => (None, None),
        };

        JsonResource {
            name: outcome.name.clone(),
            action: outcome.action.to_string(),
            status: Self::status_tag(&outcome.status),
            installed_version: outcome.installed_version.clone(),
            command: outcome.command().map(str::to_string),
            reason: outcome.skip_reason().cloned(),
            error: outcome.error().map(str::to_string),
            stdout,
            stderr,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, summary: &RunSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            dry_run: summary.dry_run,
            started_at: summary.started_at.to_rfc3339(),
            elapsed_ms: summary.elapsed_ms(),
            summary: JsonSummary {
                converged: summary.changed_count(),
                skipped: summary.skipped_count(),
                failed: summary.failed_count(),
            },
            resources: summary
                .resources
                .iter()
                .map(|r| self.outcome_to_json(r))
                .collect(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }

    fn format_outcome(
        &self,
        outcome: &ResourceOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = self.outcome_to_json(outcome);

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
