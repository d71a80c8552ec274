//! Application error types using thiserror
//!
//! Error hierarchy:
//! - GuardError: Invalid version constraints or unparseable versions
//! - ConfigError: Issues with the resource file or CLI configuration
//! - ExecError: External processes that could not be started

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while converging a single resource
#[derive(Error, Debug)]
pub enum AppError {
    /// Version guard related errors
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// Process execution related errors
    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Errors raised while evaluating a version constraint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// Constraint does not split into a comparator and a version
    #[error("malformed version constraint '{constraint}': expected '<comparator> <version>'")]
    MalformedConstraint { constraint: String },

    /// Comparator token is not one of the supported operators
    #[error("unknown comparator '{comparator}' in constraint '{constraint}'")]
    UnknownComparator {
        comparator: String,
        constraint: String,
    },

    /// A version string could not be parsed
    #[error("invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Resource file not found
    #[error("resource file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read resource file
    #[error("failed to read resource file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// A single resource declaration is invalid
    #[error("invalid resource '{name}': {message}")]
    InvalidResource { name: String, message: String },

    /// Resource file declares nothing to converge
    #[error("no modules declared in {path}")]
    Empty { path: PathBuf },
}

/// Errors related to external process execution
#[derive(Error, Debug)]
pub enum ExecError {
    /// Process could not be spawned at all
    #[error("failed to execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl GuardError {
    /// Creates a new MalformedConstraint error
    pub fn malformed_constraint(constraint: impl Into<String>) -> Self {
        GuardError::MalformedConstraint {
            constraint: constraint.into(),
        }
    }

    /// Creates a new UnknownComparator error
    pub fn unknown_comparator(comparator: impl Into<String>, constraint: impl Into<String>) -> Self {
        GuardError::UnknownComparator {
            comparator: comparator.into(),
            constraint: constraint.into(),
        }
    }

    /// Creates a new InvalidVersion error
    pub fn invalid_version(version: impl Into<String>, message: impl Into<String>) -> Self {
        GuardError::InvalidVersion {
            version: version.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResource error
    pub fn invalid_resource(name: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidResource {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl ExecError {
    /// Creates a new Spawn error
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        ExecError::Spawn {
            program: program.into(),
            source,
        }
    }
}
