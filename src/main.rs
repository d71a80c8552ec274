//! cpanmod - Idempotent Perl module installer
//!
//! Installs or uninstalls Perl modules with cpanm, skipping the work when
//! the installed version already satisfies the declaration.

use clap::Parser;
use cpanmod::cli::CliArgs;
use cpanmod::executor::SystemRunner;
use cpanmod::orchestrator::Orchestrator;
use cpanmod::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// `--verbose` enables debug events; otherwise `RUST_LOG` applies, defaulting
/// to warnings only so the report on stdout stays readable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cpanmod=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cpanmod=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    tracing::debug!("cpanmod v{} starting with {:?}", env!("CARGO_PKG_VERSION"), args);

    let resources = args.resources()?;

    let show_progress = !args.quiet && !args.json;
    let orchestrator =
        Orchestrator::new(SystemRunner::new(), args.dry_run).with_progress(show_progress);
    let summary = orchestrator.run(&resources);

    let output_config = OutputConfig::from_cli(
        args.json,
        args.verbose,
        args.quiet,
        args.dry_run,
        !args.no_color,
    );
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&summary, &mut stdout)?;
    stdout.flush()?;

    if summary.has_failures() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
