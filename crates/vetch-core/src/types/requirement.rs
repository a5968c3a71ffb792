//! Requirement types.
//!
//! Defines a single declared package requirement: a name, optional extras,
//! a version constraint and the dependency group it belongs to.

use super::SpecifierSet;
use std::fmt;

/// Declared package requirement from a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub extras: Vec<String>,
    pub specifier: SpecifierSet,
    pub group: Group,
}

/// Dependency group a requirement belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    /// Needed when the program runs
    Runtime,
    /// Tooling used only during development and testing
    Dev,
}

impl Requirement {
    /// Create a new runtime requirement
    pub fn new(name: String, specifier: SpecifierSet) -> Self {
        Self {
            name,
            extras: Vec::new(),
            specifier,
            group: Group::Runtime,
        }
    }

    /// Create a development requirement
    pub fn dev(name: String, specifier: SpecifierSet) -> Self {
        Self {
            name,
            extras: Vec::new(),
            specifier,
            group: Group::Dev,
        }
    }

    /// Add an extra to this requirement
    pub fn with_extra(mut self, extra: String) -> Self {
        self.extras.push(extra);
        self
    }

    /// Name folded for duplicate detection and index lookups
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Check if a package name is valid
    pub fn is_valid_name(name: &str) -> bool {
        if name.is_empty() || name.len() > 214 {
            return false;
        }
        if !name.chars().next().unwrap_or(' ').is_ascii_alphanumeric() {
            return false;
        }
        if !name.chars().last().unwrap_or(' ').is_ascii_alphanumeric() {
            return false;
        }
        name.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    }
}

impl Group {
    /// Check if this group is needed at runtime
    pub fn is_runtime(&self) -> bool {
        matches!(self, Group::Runtime)
    }

    /// Check if this group is only for development
    pub fn is_dev(&self) -> bool {
        matches!(self, Group::Dev)
    }

    /// Manifest section name for this group
    pub fn section(&self) -> &'static str {
        match self {
            Group::Runtime => "packages",
            Group::Dev => "dev-packages",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// Fold a package name for comparison: lowercase, with runs of
/// '-', '_' and '.' collapsed to a single '-'
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut last_was_sep = false;

    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !last_was_sep {
                normalized.push('-');
            }
            last_was_sep = true;
        } else {
            normalized.extend(c.to_lowercase());
            last_was_sep = false;
        }
    }

    normalized
}
