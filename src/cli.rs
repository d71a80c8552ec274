//! CLI argument parsing module for cpanmod

use crate::domain::{
    is_valid_module_name, ModuleSpec, Resource, VersionConstraint, DEFAULT_CPANM_PATH,
    DEFAULT_PERL_PATH,
};
use crate::error::ConfigError;
use crate::manifest::load_resources;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Validate a Perl package name such as `Foo::Bar`
fn parse_module_name(s: &str) -> Result<String, String> {
    if is_valid_module_name(s) {
        Ok(s.to_string())
    } else {
        Err(format!("'{}' is not a Perl module name", s))
    }
}

/// Validate a `<comparator> <version>` constraint and keep it verbatim
fn parse_constraint(s: &str) -> Result<String, String> {
    VersionConstraint::parse(s)
        .map(|_| s.to_string())
        .map_err(|e| e.to_string())
}

/// Idempotent Perl module installer
#[derive(Parser, Debug, Clone)]
#[command(name = "cpanmod", version, about = "Idempotent Perl module installer driving cpanm")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    // General options
    /// Dry run mode - show what would run without changing anything
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Enable verbose output and debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - only report failures
    #[arg(short, long, global = true)]
    pub quiet: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Install a module unless a satisfying version is present
    Install(InstallArgs),
    /// Uninstall a module if it is present
    Uninstall(UninstallArgs),
    /// Converge every module declared in a TOML resource file
    Apply(ApplyArgs),
}

/// Options shared by install and uninstall
#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    /// Path to the cpanm binary
    #[arg(long, env = "CPANMOD_CPANM", default_value = DEFAULT_CPANM_PATH)]
    pub cpanm_bin: String,

    /// Perl interpreter used to look up installed versions
    #[arg(long, env = "CPANMOD_PERL", default_value = DEFAULT_PERL_PATH)]
    pub perl_bin: String,

    /// Working directory and HOME for cpanm (default: /root, /var/root on macOS)
    #[arg(long)]
    pub cwd: Option<String>,

    /// Pass --force to cpanm
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `install`
#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
    /// Module name (e.g., Foo::Bar)
    #[arg(value_parser = parse_module_name)]
    pub module: String,

    /// Version constraint such as ">= 1.5" or "~> 2.2"
    #[arg(long, value_parser = parse_constraint)]
    pub constraint: Option<String>,

    /// Run the module's test suite during install
    #[arg(long = "test")]
    pub run_tests: bool,

    #[command(flatten)]
    pub tool: ToolArgs,
}

/// Arguments for `uninstall`
#[derive(Args, Debug, Clone)]
pub struct UninstallArgs {
    /// Module name (e.g., Foo::Bar)
    #[arg(value_parser = parse_module_name)]
    pub module: String,

    #[command(flatten)]
    pub tool: ToolArgs,
}

/// Arguments for `apply`
#[derive(Args, Debug, Clone)]
pub struct ApplyArgs {
    /// TOML resource file
    pub file: PathBuf,
}

impl ToolArgs {
    fn apply_to(&self, spec: ModuleSpec) -> ModuleSpec {
        let spec = spec
            .with_binary_path(&self.cpanm_bin)
            .with_perl_path(&self.perl_bin)
            .with_force(self.force);
        match self.cwd {
            Some(ref cwd) => spec.with_working_dir(cwd),
            None => spec,
        }
    }
}

impl CliArgs {
    /// Build the resources to converge from the parsed arguments
    pub fn resources(&self) -> Result<Vec<Resource>, ConfigError> {
        match &self.command {
            Command::Install(args) => {
                let mut spec = ModuleSpec::new(&args.module).with_run_tests(args.run_tests);
                if let Some(ref constraint) = args.constraint {
                    spec = spec.with_version(constraint);
                }
                Ok(vec![Resource::install(args.tool.apply_to(spec))])
            }
            Command::Uninstall(args) => {
                let spec = args.tool.apply_to(ModuleSpec::new(&args.module));
                Ok(vec![Resource::uninstall(spec)])
            }
            Command::Apply(args) => load_resources(&args.file),
        }
    }
}
