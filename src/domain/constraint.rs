//! Version constraints of the form `<comparator> <version>`
//!
//! Supported comparators:
//! - `==`, `!=`: exact match / mismatch
//! - `>`, `>=`, `<`, `<=`: ordering
//! - `~>`: pessimistic, e.g. `~> 2.2` accepts `>= 2.2, < 3`

use super::SemanticVersion;
use crate::error::GuardError;
use std::cmp::Ordering;
use std::fmt;

/// Comparison operator of a version constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `~>`
    Pessimistic,
}

impl Comparator {
    /// Returns all supported comparators
    pub fn all() -> &'static [Comparator] {
        &[
            Comparator::Eq,
            Comparator::Ne,
            Comparator::Gt,
            Comparator::Ge,
            Comparator::Lt,
            Comparator::Le,
            Comparator::Pessimistic,
        ]
    }

    /// Looks up a comparator by its token
    pub fn from_token(token: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.token() == token)
    }

    /// Returns the token as written in a constraint
    pub fn token(&self) -> &'static str {
        match self {
            Comparator::Eq => "==",
            Comparator::Ne => "!=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Pessimistic => "~>",
        }
    }

    /// Applies the comparator to `installed` against `target`
    pub fn matches(&self, installed: &SemanticVersion, target: &SemanticVersion) -> bool {
        let ord = installed.cmp(target);
        match self {
            Comparator::Eq => ord == Ordering::Equal,
            Comparator::Ne => ord != Ordering::Equal,
            Comparator::Gt => ord == Ordering::Greater,
            Comparator::Ge => ord != Ordering::Less,
            Comparator::Lt => ord == Ordering::Less,
            Comparator::Le => ord != Ordering::Greater,
            Comparator::Pessimistic => ord != Ordering::Less && *installed < target.bump(),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A parsed `<comparator> <version>` constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    /// The comparison operator
    pub comparator: Comparator,
    /// The version compared against
    pub version: SemanticVersion,
}

impl VersionConstraint {
    /// Parses a constraint, splitting on the first whitespace
    pub fn parse(constraint: &str) -> Result<Self, GuardError> {
        let trimmed = constraint.trim_start();
        let (token, version) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(|| GuardError::malformed_constraint(constraint))?;
        let version = version.trim();
        if token.is_empty() || version.is_empty() {
            return Err(GuardError::malformed_constraint(constraint));
        }

        let comparator = Comparator::from_token(token)
            .ok_or_else(|| GuardError::unknown_comparator(token, constraint))?;
        let version = SemanticVersion::parse(version)?;

        Ok(Self {
            comparator,
            version,
        })
    }

    /// Returns true if `installed` satisfies this constraint
    pub fn matches(&self, installed: &SemanticVersion) -> bool {
        self.comparator.matches(installed, &self.version)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.comparator, self.version)
    }
}
