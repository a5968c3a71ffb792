//! # vetch-core
//!
//! Core types shared across all vetch crates.
//!
//! This crate provides:
//! - Version, PartialVersion and SpecifierSet types for version constraints
//! - Requirement and Group types describing manifest entries
//! - InterpreterConstraint for the runtime version requirement
//! - VetchError enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Version, Requirement, etc.)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{VetchError, VetchResult};
pub use types::{
    Group, InterpreterConstraint, PartialVersion, Requirement, Specifier, SpecifierSet, Version,
};
