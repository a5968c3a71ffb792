//! Manifest parsing for vetch
//!
//! This crate handles parsing, validation, serialization and
//! format-preserving editing of `vetch.toml` manifests, providing the
//! typed manifest interface used by the rest of the toolkit.

pub mod edit;
pub mod loader;
pub mod toml;

// Re-export main types
pub use self::edit::{add_requirement, remove_requirement};
pub use self::loader::{ManifestLoader, MANIFEST_FILENAME};
pub use self::toml::{Manifest, RequirementSpec, RequiresSection, SourceSection};

use vetch_core::error::VetchError;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, VetchError>;
