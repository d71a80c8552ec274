//! Core domain models for cpanmod
//!
//! This module contains the fundamental types used throughout the application:
//! - Module resource declarations and actions
//! - Version values and constraints
//! - Per-resource outcomes and the run summary

mod constraint;
mod module_spec;
mod outcome;
mod summary;
mod version;

pub use constraint::{Comparator, VersionConstraint};
pub use module_spec::{
    is_valid_module_name, Action, ModuleSpec, Resource, DEFAULT_CPANM_PATH, DEFAULT_PERL_PATH,
};
pub use outcome::{ActionStatus, ResourceOutcome, SkipReason};
pub use summary::RunSummary;
pub use version::{Segment, SemanticVersion};
