//! Convergence orchestrator
//!
//! This module provides:
//! - Workflow coordination per resource: guard → command → execute
//! - Dry-run mode support
//! - Error handling with partial continuation: a failing resource is
//!   recorded and the remaining resources still converge

use crate::command::{build_command, resolve_working_dir, Platform};
use crate::domain::{Action, Resource, ResourceOutcome, RunSummary, SkipReason};
use crate::executor::CommandRunner;
use crate::guard::{install_guard, uninstall_guard};
use crate::progress::Progress;
use std::path::Path;

/// Orchestrator for converging module resources
pub struct Orchestrator<R: CommandRunner> {
    /// Runner for external processes
    runner: R,
    /// Report commands instead of executing them
    dry_run: bool,
    /// Platform used for working directory defaults
    platform: Platform,
    /// Whether to draw a spinner while commands run
    show_progress: bool,
}

impl<R: CommandRunner> Orchestrator<R> {
    /// Create a new orchestrator for the current platform
    pub fn new(runner: R, dry_run: bool) -> Self {
        Self {
            runner,
            dry_run,
            platform: Platform::current(),
            show_progress: false,
        }
    }

    /// Override the platform (for testing working directory defaults)
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Enable or disable the progress spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Returns the runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Converge every resource in order
    pub fn run(&self, resources: &[Resource]) -> RunSummary {
        let mut progress = Progress::new(self.show_progress);
        let mut summary = RunSummary::new(self.dry_run);

        for resource in resources {
            let outcome = self.converge_with_progress(resource, &mut progress);
            summary.add(outcome);
        }

        summary.finish();
        tracing::info!(
            changed = summary.changed_count(),
            skipped = summary.skipped_count(),
            failed = summary.failed_count(),
            "convergence finished"
        );
        summary
    }

    /// Converge a single resource
    pub fn converge(&self, resource: &Resource) -> ResourceOutcome {
        self.converge_with_progress(resource, &mut Progress::disabled())
    }

    fn converge_with_progress(
        &self,
        resource: &Resource,
        progress: &mut Progress,
    ) -> ResourceOutcome {
        tracing::debug!("converging {}", resource);
        match resource.action {
            Action::Install => self.converge_install(resource, progress),
            Action::Uninstall => self.converge_uninstall(resource, progress),
        }
    }

    fn converge_install(&self, resource: &Resource, progress: &mut Progress) -> ResourceOutcome {
        let spec = &resource.spec;
        let decision = match install_guard(&self.runner, spec) {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!(module = %spec.name, error = %e, "install guard failed");
                return ResourceOutcome::failed(&spec.name, resource.action, None, e.to_string());
            }
        };

        if decision.satisfied {
            return ResourceOutcome::skipped(&spec.name, resource.action, SkipReason::UpToDate)
                .with_installed_version(decision.installed_version);
        }

        self.execute(resource, progress)
            .with_installed_version(decision.installed_version)
    }

    fn converge_uninstall(&self, resource: &Resource, progress: &mut Progress) -> ResourceOutcome {
        let spec = &resource.spec;
        match uninstall_guard(&self.runner, spec) {
            Ok(true) => self.execute(resource, progress),
            Ok(false) => {
                ResourceOutcome::skipped(&spec.name, resource.action, SkipReason::NotInstalled)
            }
            Err(e) => {
                tracing::warn!(module = %spec.name, error = %e, "uninstall guard failed");
                ResourceOutcome::failed(&spec.name, resource.action, None, e.to_string())
            }
        }
    }

    fn execute(&self, resource: &Resource, progress: &mut Progress) -> ResourceOutcome {
        let spec = &resource.spec;
        let command = build_command(spec, resource.action);

        if self.dry_run {
            tracing::info!(module = %spec.name, command = %command, "would run");
            return ResourceOutcome::would_run(&spec.name, resource.action, command);
        }

        let working_dir = resolve_working_dir(spec, self.platform.is_darwin());
        tracing::info!(module = %spec.name, command = %command, cwd = %working_dir, "running");

        progress.spinner(&format!("{} {}", capitalize(resource.action.as_str()), spec.name));
        let result = self.runner.run_shell(&command, Path::new(&working_dir));
        progress.finish_and_clear();

        match result {
            Ok(output) if output.success => ResourceOutcome::converged(
                &spec.name,
                resource.action,
                command,
                output.stdout,
                output.stderr,
            ),
            Ok(output) => {
                let error = output.failure_message();
                tracing::warn!(module = %spec.name, error = %error, "command failed");
                ResourceOutcome::failed(&spec.name, resource.action, Some(command), error)
            }
            Err(e) => {
                tracing::warn!(module = %spec.name, error = %e, "command could not start");
                ResourceOutcome::failed(&spec.name, resource.action, Some(command), e.to_string())
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
