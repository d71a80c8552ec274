//! Declared module resources
//!
//! A `ModuleSpec` carries the properties of one cpan module resource and is
//! never mutated once built; a `Resource` pairs it with the action to take.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Default location of the cpanm binary
pub const DEFAULT_CPANM_PATH: &str = "/usr/local/bin/cpanm";

/// Default perl interpreter used for version lookups
pub const DEFAULT_PERL_PATH: &str = "perl";

static MODULE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z0-9_]+)*$").unwrap()
});

/// Returns true if `name` is a Perl package name such as `Foo::Bar`
///
/// Names end up in a `/bin/sh -c` command line, so anything outside the
/// package grammar is rejected.
pub fn is_valid_module_name(name: &str) -> bool {
    MODULE_NAME.is_match(name)
}

/// Action to converge a module resource towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Install the module unless a satisfying version is present
    #[default]
    Install,
    /// Remove the module if it is present
    Uninstall,
}

impl Action {
    /// Returns the lowercase action name
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Install => "install",
            Action::Uninstall => "uninstall",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Properties of a single Perl module resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSpec {
    /// Module name (e.g., `Foo::Bar`)
    pub name: String,
    /// Optional constraint such as `>= 1.5`
    pub version: Option<String>,
    /// Pass `--force` to cpanm
    pub force: bool,
    /// Run the module's test suite during install
    pub run_tests: bool,
    /// Working directory and HOME for the cpanm process
    pub working_dir: Option<String>,
    /// Path to the cpanm binary
    pub binary_path: String,
    /// Perl interpreter used to query installed versions
    pub perl_path: String,
}

impl ModuleSpec {
    /// Creates a new ModuleSpec with default properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            force: false,
            run_tests: false,
            working_dir: None,
            binary_path: DEFAULT_CPANM_PATH.to_string(),
            perl_path: DEFAULT_PERL_PATH.to_string(),
        }
    }

    /// Sets the version constraint
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the force flag
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Sets whether tests run during install
    pub fn with_run_tests(mut self, run_tests: bool) -> Self {
        self.run_tests = run_tests;
        self
    }

    /// Sets the working directory
    pub fn with_working_dir(mut self, working_dir: impl Into<String>) -> Self {
        self.working_dir = Some(working_dir.into());
        self
    }

    /// Sets the cpanm binary path
    pub fn with_binary_path(mut self, binary_path: impl Into<String>) -> Self {
        self.binary_path = binary_path.into();
        self
    }

    /// Sets the perl interpreter path
    pub fn with_perl_path(mut self, perl_path: impl Into<String>) -> Self {
        self.perl_path = perl_path.into();
        self
    }

    /// Returns the version constraint, if any
    pub fn constraint(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

/// A module spec paired with the action to converge it towards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// The declared module properties
    pub spec: ModuleSpec,
    /// What to do with the module
    pub action: Action,
}

impl Resource {
    /// Creates a new Resource
    pub fn new(spec: ModuleSpec, action: Action) -> Self {
        Self { spec, action }
    }

    /// Creates an install resource
    pub fn install(spec: ModuleSpec) -> Self {
        Self::new(spec, Action::Install)
    }

    /// Creates an uninstall resource
    pub fn uninstall(spec: ModuleSpec) -> Self {
        Self::new(spec, Action::Uninstall)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cpan_module[{}] :{}", self.spec.name, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_spec_defaults() {
        let spec = ModuleSpec::new("Foo::Bar");
        assert_eq!(spec.name, "Foo::Bar");
        assert!(spec.version.is_none());
        assert!(!spec.force);
        assert!(!spec.run_tests);
        assert!(spec.working_dir.is_none());
        assert_eq!(spec.binary_path, "/usr/local/bin/cpanm");
        assert_eq!(spec.perl_path, "perl");
    }

    #[test]
    fn test_module_spec_builders() {
        let spec = ModuleSpec::new("Foo::Bar")
            .with_version(">= 1.5")
            .with_force(true)
            .with_run_tests(true)
            .with_working_dir("/tmp")
            .with_binary_path("/opt/cpanm")
            .with_perl_path("/opt/perl/bin/perl");
        assert_eq!(spec.constraint(), Some(">= 1.5"));
        assert!(spec.force);
        assert!(spec.run_tests);
        assert_eq!(spec.working_dir.as_deref(), Some("/tmp"));
        assert_eq!(spec.binary_path, "/opt/cpanm");
        assert_eq!(spec.perl_path, "/opt/perl/bin/perl");
    }

    #[test]
    fn test_valid_module_names() {
        for name in ["Foo", "Foo::Bar", "JSON::XS", "_private::v2", "Moose::Util::TypeConstraints"] {
            assert!(is_valid_module_name(name), "{}", name);
        }
    }

    #[test]
    fn test_invalid_module_names() {
        for name in [
            "",
            "  ",
            "1Foo",
            "Foo::",
            "::Foo",
            "Foo:::Bar",
            "Foo-Bar",
            "Foo::Bar; rm -rf /",
            "Foo$(id)",
            " Foo::Bar",
        ] {
            assert!(!is_valid_module_name(name), "{:?}", name);
        }
    }

    #[test]
    fn test_action_default_is_install() {
        assert_eq!(Action::default(), Action::Install);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(format!("{}", Action::Install), "install");
        assert_eq!(format!("{}", Action::Uninstall), "uninstall");
    }

    #[test]
    fn test_serde_action() {
        let json = serde_json::to_string(&Action::Uninstall).unwrap();
        assert_eq!(json, "\"uninstall\"");

        let parsed: Action = serde_json::from_str("\"install\"").unwrap();
        assert_eq!(parsed, Action::Install);
    }

    #[test]
    fn test_resource_display() {
        let resource = Resource::uninstall(ModuleSpec::new("Foo::Bar"));
        assert_eq!(format!("{}", resource), "cpan_module[Foo::Bar] :uninstall");
    }
}
