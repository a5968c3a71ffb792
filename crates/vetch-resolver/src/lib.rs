//! Constraint satisfaction for vetch manifests
//!
//! This crate checks declared version constraints against a listing of
//! available versions: best-match selection per requirement and a
//! whole-manifest satisfiability report.

pub mod select;

// Re-export main types
pub use select::{
    check_manifest, PackageIndex, Report, ReportEntry, RequirementStatus, VersionSelector,
};

use vetch_core::error::VetchError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, VetchError>;
