//! External process execution
//!
//! This module provides:
//! - Version lookup and presence check against the perl runtime
//! - Execution of cpanm commands with a fixed environment

use crate::command::ACTION_PATH;
use crate::error::ExecError;
use std::path::Path;
use std::process::{Command, Stdio};

/// Shell used to run cpanm commands
const SHELL: &str = "/bin/sh";

/// Output of an executed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// The command that was executed
    pub command: String,
    /// Whether the command exited successfully
    pub success: bool,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Standard output from the command
    pub stdout: String,
    /// Standard error from the command
    pub stderr: String,
}

impl CommandOutput {
    /// Create a successful command output
    pub fn success(command: impl Into<String>, stdout: String, stderr: String) -> Self {
        Self {
            command: command.into(),
            success: true,
            code: Some(0),
            stdout,
            stderr,
        }
    }

    /// Create a failed command output
    pub fn failure(
        command: impl Into<String>,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    ) -> Self {
        Self {
            command: command.into(),
            success: false,
            code,
            stdout,
            stderr,
        }
    }

    /// Describes a failed exit for error reporting
    pub fn failure_message(&self) -> String {
        let status = match self.code {
            Some(code) => format!("exited with status {}", code),
            None => "was terminated by a signal".to_string(),
        };
        let detail = self.stderr.trim();
        if detail.is_empty() {
            format!("command {}", status)
        } else {
            format!("command {}: {}", status, detail)
        }
    }
}

/// Trait for the external processes the guard and actions depend on
pub trait CommandRunner {
    /// Prints `$<module>::VERSION` through perl and returns raw stdout
    ///
    /// Stderr is discarded and the exit status is not inspected: a failed
    /// lookup yields empty or unparseable output, which reads as "absent".
    fn lookup_version(&self, perl: &str, module: &str) -> Result<String, ExecError>;

    /// Returns true if perl can load `module`
    ///
    /// Presence is judged by exit status alone, so a perl that fails for any
    /// other reason also reports the module as absent.
    fn module_exists(&self, perl: &str, module: &str) -> Result<bool, ExecError>;

    /// Runs `command` through the shell inside `working_dir`
    fn run_shell(&self, command: &str, working_dir: &Path) -> Result<CommandOutput, ExecError>;
}

/// Default runner that spawns real processes
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn lookup_version(&self, perl: &str, module: &str) -> Result<String, ExecError> {
        let output = Command::new(perl)
            .arg(format!("-M{}", module))
            .arg("-e")
            .arg(format!("print ${}::VERSION;", module))
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| ExecError::spawn(perl, e))?;

        tracing::debug!(module, status = ?output.status, "version lookup finished");
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn module_exists(&self, perl: &str, module: &str) -> Result<bool, ExecError> {
        let status = Command::new(perl)
            .arg(format!("-m{}", module))
            .arg("-e")
            .arg(";")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ExecError::spawn(perl, e))?;

        tracing::debug!(module, %status, "presence check finished");
        Ok(status.success())
    }

    fn run_shell(&self, command: &str, working_dir: &Path) -> Result<CommandOutput, ExecError> {
        let output = Command::new(SHELL)
            .arg("-c")
            .arg(command)
            .current_dir(working_dir)
            .env("HOME", working_dir)
            .env("PATH", ACTION_PATH)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ExecError::spawn(SHELL, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(CommandOutput::success(command, stdout, stderr))
        } else {
            Ok(CommandOutput::failure(
                command,
                output.status.code(),
                stdout,
                stderr,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_output_success() {
        let output = CommandOutput::success("cpanm Foo", "done".to_string(), String::new());
        assert!(output.success);
        assert_eq!(output.code, Some(0));
        assert_eq!(output.command, "cpanm Foo");
    }

    #[test]
    fn test_command_output_failure_message_with_stderr() {
        let output = CommandOutput::failure(
            "cpanm Foo",
            Some(1),
            String::new(),
            "! Finding Foo on cpanmetadb failed.\n".to_string(),
        );
        assert!(!output.success);
        assert_eq!(
            output.failure_message(),
            "command exited with status 1: ! Finding Foo on cpanmetadb failed."
        );
    }

    #[test]
    fn test_command_output_failure_message_signal() {
        let output = CommandOutput::failure("cpanm Foo", None, String::new(), String::new());
        assert_eq!(output.failure_message(), "command was terminated by a signal");
    }

    #[test]
    fn test_lookup_version_missing_perl_is_spawn_error() {
        let runner = SystemRunner::new();
        let err = runner
            .lookup_version("/nonexistent/cpanmod-test/perl", "Foo::Bar")
            .unwrap_err();
        assert!(matches!(err, ExecError::Spawn { .. }));
    }

    #[test]
    fn test_module_exists_missing_perl_is_spawn_error() {
        let runner = SystemRunner::new();
        assert!(runner
            .module_exists("/nonexistent/cpanmod-test/perl", "Foo::Bar")
            .is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_shell_sets_home_and_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let runner = SystemRunner::new();

        let output = runner
            .run_shell("echo \"$HOME|$PATH\"", temp_dir.path())
            .unwrap();

        assert!(output.success);
        assert_eq!(
            output.stdout.trim(),
            format!("{}|{}", temp_dir.path().display(), ACTION_PATH)
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_run_shell_reports_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let runner = SystemRunner::new();

        let output = runner
            .run_shell("echo boom >&2; exit 3", temp_dir.path())
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stderr.trim(), "boom");
    }

    #[test]
    fn test_run_shell_missing_working_dir_is_spawn_error() {
        let runner = SystemRunner::new();
        let result = runner.run_shell("true", Path::new("/nonexistent/cpanmod-test/dir"));
        assert!(result.is_err());
    }
}
