//! Run summary types
//!
//! Collects the outcome of every resource converged in one invocation.

use super::ResourceOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall summary of a convergence run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Outcome for each resource, in declaration order
    pub resources: Vec<ResourceOutcome>,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    /// Creates a new RunSummary starting now
    pub fn new(dry_run: bool) -> Self {
        Self {
            resources: Vec::new(),
            dry_run,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Adds a resource outcome
    pub fn add(&mut self, outcome: ResourceOutcome) {
        self.resources.push(outcome);
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Returns the number of resources that changed
    pub fn changed_count(&self) -> usize {
        self.resources.iter().filter(|r| r.is_changed()).count()
    }

    /// Returns the number of resources that needed nothing
    pub fn skipped_count(&self) -> usize {
        self.resources.iter().filter(|r| r.is_skipped()).count()
    }

    /// Returns the number of resources that failed
    pub fn failed_count(&self) -> usize {
        self.resources.iter().filter(|r| r.is_failed()).count()
    }

    /// Returns true if any resource failed
    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    /// Returns all failed outcomes
    pub fn failures(&self) -> impl Iterator<Item = &ResourceOutcome> {
        self.resources.iter().filter(|r| r.is_failed())
    }

    /// Returns the elapsed wall time in milliseconds, once finished
    pub fn elapsed_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|end| end.signed_duration_since(self.started_at).num_milliseconds())
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Action, SkipReason};

    fn sample_summary() -> RunSummary {
        let mut summary = RunSummary::new(false);
        summary.add(ResourceOutcome::converged(
            "Foo::Bar",
            Action::Install,
            "cpanm Foo::Bar",
            "",
            "",
        ));
        summary.add(ResourceOutcome::skipped(
            "Baz",
            Action::Install,
            SkipReason::UpToDate,
        ));
        summary.add(ResourceOutcome::skipped(
            "Qux",
            Action::Uninstall,
            SkipReason::NotInstalled,
        ));
        summary.add(ResourceOutcome::failed(
            "Broken",
            Action::Install,
            None,
            "bad constraint",
        ));
        summary
    }

    #[test]
    fn test_counts() {
        let summary = sample_summary();
        assert_eq!(summary.changed_count(), 1);
        assert_eq!(summary.skipped_count(), 2);
        assert_eq!(summary.failed_count(), 1);
        assert!(summary.has_failures());
        assert_eq!(summary.failures().next().unwrap().name, "Broken");
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::default();
        assert!(!summary.dry_run);
        assert!(!summary.has_failures());
        assert_eq!(summary.changed_count(), 0);
    }

    #[test]
    fn test_finish_sets_elapsed() {
        let mut summary = RunSummary::new(true);
        assert!(summary.elapsed_ms().is_none());
        summary.finish();
        assert!(summary.finished_at.is_some());
        assert!(summary.elapsed_ms().unwrap() >= 0);
    }
}
