//! cpanmod - Idempotent Perl module installer library
//!
//! This library converges declared Perl module resources through cpanm:
//! - Version guard: look up the installed version and test it against a constraint
//! - Command synthesis for cpanm install/uninstall
//! - Resource files declaring many modules in TOML

pub mod cli;
pub mod command;
pub mod domain;
pub mod error;
pub mod executor;
pub mod guard;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
