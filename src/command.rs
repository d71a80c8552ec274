//! cpanm command synthesis and working directory resolution
//!
//! Commands are plain strings handed to `/bin/sh -c`; building them has no
//! side effects and always succeeds.

use crate::domain::{Action, ModuleSpec};

/// Default HOME for the cpanm process on macOS
pub const DARWIN_HOME: &str = "/var/root";

/// Default HOME for the cpanm process elsewhere
pub const DEFAULT_HOME: &str = "/root";

/// PATH given to the cpanm process
pub const ACTION_PATH: &str = "/usr/local/bin:/usr/bin:/bin";

/// Host platform as far as working directory defaults are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS
    Darwin,
    /// Anything else
    Other,
}

impl Platform {
    /// Detects the platform this binary was built for
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Darwin
        } else {
            Platform::Other
        }
    }

    /// Returns true for macOS
    pub fn is_darwin(&self) -> bool {
        matches!(self, Platform::Darwin)
    }
}

/// Builds the cpanm command that installs `spec`
pub fn build_install_command(spec: &ModuleSpec) -> String {
    let mut cmd = format!("{} --quiet ", spec.binary_path);
    if spec.force {
        cmd.push_str("--force ");
    }
    if !spec.run_tests {
        cmd.push_str("--notest ");
    }
    cmd.push_str(&spec.name);
    cmd.push_str(&version_pin(spec));
    cmd
}

/// Builds the cpanm command that uninstalls `spec`
pub fn build_uninstall_command(spec: &ModuleSpec) -> String {
    let mut cmd = format!("{} ", spec.binary_path);
    if spec.force {
        cmd.push_str("--force ");
    }
    cmd.push_str("--uninstall ");
    cmd.push_str(&spec.name);
    cmd
}

/// Builds the command for `action`
pub fn build_command(spec: &ModuleSpec, action: Action) -> String {
    match action {
        Action::Install => build_install_command(spec),
        Action::Uninstall => build_uninstall_command(spec),
    }
}

/// cpanm accepts `Module~"<constraint>"` to pin a version range
fn version_pin(spec: &ModuleSpec) -> String {
    match spec.constraint() {
        Some(constraint) => format!("~\"{}\"", constraint),
        None => String::new(),
    }
}

/// Returns the directory cpanm runs in (and uses as HOME)
pub fn resolve_working_dir(spec: &ModuleSpec, platform_is_darwin: bool) -> String {
    if let Some(ref dir) = spec.working_dir {
        return dir.clone();
    }
    if platform_is_darwin {
        DARWIN_HOME.to_string()
    } else {
        DEFAULT_HOME.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_command_defaults() {
        let spec = ModuleSpec::new("Foo::Bar");
        assert_eq!(
            build_install_command(&spec),
            "/usr/local/bin/cpanm --quiet --notest Foo::Bar"
        );
    }

    #[test]
    fn test_install_command_all_flags() {
        let spec = ModuleSpec::new("Foo::Bar")
            .with_force(true)
            .with_run_tests(true)
            .with_version(">= 1.5")
            .with_binary_path("/opt/cpanm");
        assert_eq!(
            build_install_command(&spec),
            "/opt/cpanm --quiet --force Foo::Bar~\">= 1.5\""
        );
    }

    #[test]
    fn test_install_command_version_pin_is_verbatim() {
        let spec = ModuleSpec::new("Foo::Bar").with_version("~>  2.2");
        assert!(build_install_command(&spec).ends_with("Foo::Bar~\"~>  2.2\""));
    }

    #[test]
    fn test_install_command_is_pure() {
        let spec = ModuleSpec::new("Foo::Bar").with_version("== 1.0");
        assert_eq!(build_install_command(&spec), build_install_command(&spec));
    }

    #[test]
    fn test_uninstall_command() {
        let spec = ModuleSpec::new("Foo::Bar");
        assert_eq!(
            build_uninstall_command(&spec),
            "/usr/local/bin/cpanm --uninstall Foo::Bar"
        );
    }

    #[test]
    fn test_uninstall_command_ignores_tests_and_version() {
        let spec = ModuleSpec::new("Foo::Bar")
            .with_force(true)
            .with_run_tests(false)
            .with_version(">= 1.5");
        assert_eq!(
            build_uninstall_command(&spec),
            "/usr/local/bin/cpanm --force --uninstall Foo::Bar"
        );
    }

    #[test]
    fn test_build_command_dispatches_on_action() {
        let spec = ModuleSpec::new("Foo::Bar");
        assert_eq!(
            build_command(&spec, Action::Install),
            build_install_command(&spec)
        );
        assert_eq!(
            build_command(&spec, Action::Uninstall),
            build_uninstall_command(&spec)
        );
    }

    #[test]
    fn test_resolve_working_dir_explicit() {
        let spec = ModuleSpec::new("Foo::Bar").with_working_dir("/srv/app");
        assert_eq!(resolve_working_dir(&spec, true), "/srv/app");
        assert_eq!(resolve_working_dir(&spec, false), "/srv/app");
    }

    #[test]
    fn test_resolve_working_dir_defaults() {
        let spec = ModuleSpec::new("Foo::Bar");
        assert_eq!(resolve_working_dir(&spec, true), "/var/root");
        assert_eq!(resolve_working_dir(&spec, false), "/root");
    }

    #[test]
    fn test_platform_current_matches_target() {
        assert_eq!(Platform::current().is_darwin(), cfg!(target_os = "macos"));
    }
}
