//! Progress display while cpanm commands run
//!
//! cpanm can take minutes per module; a spinner on stderr shows which
//! resource is converging.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for the convergence run
pub struct Progress {
    /// Whether progress display is enabled (disabled in quiet and JSON mode)
    enabled: bool,
    /// Current spinner
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Returns true if the spinner is drawn
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Show a spinner with a message for a running command
    pub fn spinner(&mut self, message: &str) {
        if !self.is_enabled() {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Finish and clear the current spinner
    pub fn finish_and_clear(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        self.bar = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_disabled() {
        let mut progress = Progress::disabled();
        assert!(!progress.is_enabled());
        progress.spinner("Installing Foo::Bar");
        assert!(progress.bar.is_none());
        progress.finish_and_clear();
    }

    #[test]
    fn test_progress_enabled() {
        let mut progress = Progress::new(true);
        progress.spinner("Installing Foo::Bar");
        assert!(progress.bar.is_some());
        progress.finish_and_clear();
        assert!(progress.bar.is_none());
    }
}
