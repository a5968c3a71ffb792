//! Error types and result aliases for vetch operations.
//!
//! Provides a unified error type that covers all possible error conditions
//! across the vetch crates with actionable error messages.

use thiserror::Error;

/// Unified error type for all vetch operations
#[derive(Error, Debug)]
pub enum VetchError {
    // Manifest errors
    #[error("Failed to parse manifest: {message}")]
    ManifestParse { message: String },

    #[error("Manifest field '{field}' is invalid: {reason}")]
    Validation { field: String, reason: String },

    #[error("Duplicate requirement '{name}' in [{group}] (same package after name normalization)")]
    DuplicateRequirement { name: String, group: String },

    // Version errors
    #[error("Invalid version specifier for '{name}': {reason}")]
    InvalidSpecifier { name: String, reason: String },

    // Resolution errors
    #[error("No available version of '{name}' satisfies '{constraint}'")]
    Unsatisfiable { name: String, constraint: String },

    #[error("Package '{name}' not found in the version index")]
    UnknownPackage { name: String },

    // Edit errors
    #[error("Requirement '{name}' is not declared in [{group}]")]
    RequirementNotFound { name: String, group: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for vetch operations
pub type VetchResult<T> = Result<T, VetchError>;

impl VetchError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            VetchError::ManifestParse { .. } => {
                Some("Check the manifest for TOML syntax errors near the reported location")
            },
            VetchError::DuplicateRequirement { .. } => {
                Some("Package names are compared case-insensitively with '-', '_' and '.' folded together; remove one of the entries")
            },
            VetchError::InvalidSpecifier { .. } => {
                Some("Specifiers look like \"==1.2.3\", \">=1.0, <2.0\", \"~=1.4\" or \"*\"")
            },
            VetchError::Unsatisfiable { .. } => {
                Some("Loosen the version constraint or check for a newer release")
            },
            VetchError::UnknownPackage { .. } => {
                Some("Check the package name spelling against the version index")
            },
            _ => None,
        }
    }
}
