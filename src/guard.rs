//! Idempotence guard for module actions
//!
//! Install is skipped when the installed version satisfies the declared
//! constraint (or any version is installed when no constraint is declared).
//! Uninstall only runs when perl can load the module.

use crate::domain::{ModuleSpec, SemanticVersion, VersionConstraint};
use crate::error::{AppError, GuardError};
use crate::executor::CommandRunner;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_VERSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9.]*").unwrap());

/// Extracts the leading version token from raw version lookup output
///
/// Empty output means the module is not installed and yields an empty
/// string. A leading `v` is dropped and `_` separators (as in `1.23_01`)
/// become dots before the leading run of digits and dots is taken.
pub fn extract_version(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let normalized = raw.strip_prefix('v').unwrap_or(raw).replace('_', ".");
    LEADING_VERSION
        .find(&normalized)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Returns true if `installed` satisfies `constraint`
///
/// An empty `installed` version is never satisfied; an absent constraint is
/// satisfied by any installed version.
pub fn is_satisfied(installed: &str, constraint: Option<&str>) -> Result<bool, GuardError> {
    if installed.is_empty() {
        return Ok(false);
    }
    let Some(constraint) = constraint else {
        return Ok(true);
    };

    let constraint = VersionConstraint::parse(constraint)?;
    let installed = SemanticVersion::parse(installed)?;
    Ok(constraint.matches(&installed))
}

/// Outcome of the install guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardDecision {
    /// Version found by the lookup, `None` when not installed
    pub installed_version: Option<String>,
    /// Whether the install can be skipped
    pub satisfied: bool,
}

/// Looks up the installed version of `spec` and evaluates its constraint
pub fn install_guard<R: CommandRunner + ?Sized>(
    runner: &R,
    spec: &ModuleSpec,
) -> Result<GuardDecision, AppError> {
    let raw = runner.lookup_version(&spec.perl_path, &spec.name)?;
    let installed = extract_version(&raw);
    let satisfied = is_satisfied(&installed, spec.constraint())?;

    tracing::debug!(
        module = %spec.name,
        installed = %installed,
        constraint = ?spec.constraint(),
        satisfied,
        "install guard evaluated"
    );

    Ok(GuardDecision {
        installed_version: (!installed.is_empty()).then_some(installed),
        satisfied,
    })
}

/// Returns true if `spec` is present and an uninstall has something to remove
pub fn uninstall_guard<R: CommandRunner + ?Sized>(
    runner: &R,
    spec: &ModuleSpec,
) -> Result<bool, AppError> {
    let present = runner.module_exists(&spec.perl_path, &spec.name)?;
    tracing::debug!(module = %spec.name, present, "uninstall guard evaluated");
    Ok(present)
}
