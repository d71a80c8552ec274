//! Resource file parsing
//!
//! A resource file declares modules as TOML tables keyed by resource
//! identifier, with optional shared defaults:
//!
//! ```toml
//! [defaults]
//! binary_path = "/opt/cpanm"
//!
//! [module."Foo::Bar"]
//! version = ">= 1.5"
//!
//! [module."Old::Thing"]
//! action = "uninstall"
//! ```
//!
//! Resources are returned in declaration order.

use crate::domain::{
    is_valid_module_name, Action, ModuleSpec, Resource, VersionConstraint, DEFAULT_CPANM_PATH,
    DEFAULT_PERL_PATH,
};
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Top-level layout of a resource file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResourceFile {
    #[serde(default)]
    defaults: Defaults,
    #[serde(default)]
    module: toml::Table,
}

/// Properties applied to every module unless overridden
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Defaults {
    binary_path: Option<String>,
    perl_path: Option<String>,
    force: Option<bool>,
    run_tests: Option<bool>,
    working_dir: Option<String>,
}

/// A single `[module."<name>"]` table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModuleEntry {
    module_name: Option<String>,
    binary_path: Option<String>,
    perl_path: Option<String>,
    force: Option<bool>,
    run_tests: Option<bool>,
    version: Option<String>,
    working_dir: Option<String>,
    #[serde(default)]
    action: Action,
}

impl ModuleEntry {
    fn into_resource(self, key: &str, defaults: &Defaults) -> Result<Resource, ConfigError> {
        let name = self.module_name.unwrap_or_else(|| key.to_string());
        if !is_valid_module_name(&name) {
            return Err(ConfigError::invalid_resource(
                key,
                format!("invalid module name '{}'", name),
            ));
        }

        if let Some(ref version) = self.version {
            VersionConstraint::parse(version)
                .map_err(|e| ConfigError::invalid_resource(key, e.to_string()))?;
        }

        let spec = ModuleSpec {
            name,
            version: self.version,
            force: self.force.or(defaults.force).unwrap_or(false),
            run_tests: self.run_tests.or(defaults.run_tests).unwrap_or(false),
            working_dir: self.working_dir.or_else(|| defaults.working_dir.clone()),
            binary_path: self
                .binary_path
                .or_else(|| defaults.binary_path.clone())
                .unwrap_or_else(|| DEFAULT_CPANM_PATH.to_string()),
            perl_path: self
                .perl_path
                .or_else(|| defaults.perl_path.clone())
                .unwrap_or_else(|| DEFAULT_PERL_PATH.to_string()),
        };

        Ok(Resource::new(spec, self.action))
    }
}

/// Reads and parses a resource file
pub fn load_resources(path: &Path) -> Result<Vec<Resource>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::not_found(path));
    }
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
    parse_resources(&content, path)
}

/// Parses resource file content; `path` is used for error messages
pub fn parse_resources(content: &str, path: &Path) -> Result<Vec<Resource>, ConfigError> {
    let file: ResourceFile =
        toml::from_str(content).map_err(|e| ConfigError::toml_parse_error(path, e.to_string()))?;

    if file.module.is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut resources = Vec::with_capacity(file.module.len());
    for (key, value) in file.module {
        let entry: ModuleEntry = value
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::invalid_resource(&key, e.to_string()))?;
        resources.push(entry.into_resource(&key, &file.defaults)?);
    }

    tracing::debug!(count = resources.len(), path = %path.display(), "loaded resources");
    Ok(resources)
}
