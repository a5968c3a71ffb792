//! Core data types for vetch manifests.
//!
//! This module provides the fundamental types used throughout the vetch
//! crates:
//! - Version and specifier types for version constraints
//! - Requirement and Group for declared packages
//! - InterpreterConstraint for the runtime requirement

pub mod interpreter;
pub mod requirement;
pub mod version;

// Re-export all public types
pub use interpreter::InterpreterConstraint;
pub use requirement::{normalize_name, Group, Requirement};
pub use version::{Op, PartialVersion, Specifier, SpecifierSet, Version, VersionError};
