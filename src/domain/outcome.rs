//! Convergence result types for a single resource

use super::Action;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason why a resource needed no action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Installed version already satisfies the declaration
    UpToDate,
    /// Nothing to uninstall
    NotInstalled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UpToDate => write!(f, "up to date"),
            SkipReason::NotInstalled => write!(f, "not installed"),
        }
    }
}

/// What happened to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionStatus {
    /// The command ran and succeeded
    Converged {
        /// The command that was executed
        command: String,
        /// Standard output from the command
        stdout: String,
        /// Standard error from the command
        stderr: String,
    },
    /// Dry-run: the command would have been executed
    WouldRun {
        /// The command that would run
        command: String,
    },
    /// The guard was satisfied; nothing ran
    Skipped {
        /// Why nothing ran
        reason: SkipReason,
    },
    /// The guard or the command failed
    Failed {
        /// The command, if one was attempted
        command: Option<String>,
        /// What went wrong
        error: String,
    },
}

/// Result of converging a single resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOutcome {
    /// Module name
    pub name: String,
    /// Action that was requested
    pub action: Action,
    /// Version found before acting, when it was looked up
    pub installed_version: Option<String>,
    /// What happened
    pub status: ActionStatus,
}

impl ResourceOutcome {
    /// Creates a new ResourceOutcome
    pub fn new(name: impl Into<String>, action: Action, status: ActionStatus) -> Self {
        Self {
            name: name.into(),
            action,
            installed_version: None,
            status,
        }
    }

    /// Creates a Converged outcome
    pub fn converged(
        name: impl Into<String>,
        action: Action,
        command: impl Into<String>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            action,
            ActionStatus::Converged {
                command: command.into(),
                stdout: stdout.into(),
                stderr: stderr.into(),
            },
        )
    }

    /// Creates a WouldRun outcome
    pub fn would_run(name: impl Into<String>, action: Action, command: impl Into<String>) -> Self {
        Self::new(
            name,
            action,
            ActionStatus::WouldRun {
                command: command.into(),
            },
        )
    }

    /// Creates a Skipped outcome
    pub fn skipped(name: impl Into<String>, action: Action, reason: SkipReason) -> Self {
        Self::new(name, action, ActionStatus::Skipped { reason })
    }

    /// Creates a Failed outcome
    pub fn failed(
        name: impl Into<String>,
        action: Action,
        command: Option<String>,
        error: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            action,
            ActionStatus::Failed {
                command,
                error: error.into(),
            },
        )
    }

    /// Records the version found before acting
    pub fn with_installed_version(mut self, version: Option<String>) -> Self {
        self.installed_version = version;
        self
    }

    /// Returns true if the resource changed (or would change in dry-run)
    pub fn is_changed(&self) -> bool {
        matches!(
            self.status,
            ActionStatus::Converged { .. } | ActionStatus::WouldRun { .. }
        )
    }

    /// Returns true if nothing needed to be done
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, ActionStatus::Skipped { .. })
    }

    /// Returns true if the resource failed
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ActionStatus::Failed { .. })
    }

    /// Returns the command that ran or would run
    pub fn command(&self) -> Option<&str> {
        match &self.status {
            ActionStatus::Converged { command, .. } | ActionStatus::WouldRun { command } => {
                Some(command)
            }
            ActionStatus::Failed { command, .. } => command.as_deref(),
            ActionStatus::Skipped { .. } => None,
        }
    }

    /// Returns the skip reason if skipped
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.status {
            ActionStatus::Skipped { reason } => Some(reason),
            _ => None,
        }
    }

    /// Returns the error message if failed
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ActionStatus::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
