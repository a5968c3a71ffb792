//! vetch.toml manifest parsing, validation and serialization

use crate::ManifestResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use vetch_core::error::VetchError;
use vetch_core::types::{normalize_name, Group, InterpreterConstraint, Requirement, SpecifierSet};

/// Complete vetch.toml manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Package source repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceSection>,

    /// Runtime requirements
    #[serde(default)]
    pub packages: IndexMap<String, RequirementSpec>,

    /// Development-only requirements
    #[serde(default, rename = "dev-packages")]
    pub dev_packages: IndexMap<String, RequirementSpec>,

    /// Interpreter requirement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<RequiresSection>,
}

/// `[source]` section: where packages are fetched from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSection {
    /// Repository URL (required)
    pub url: String,

    /// TLS verification flag
    #[serde(default = "default_verify_ssl", rename = "verify-ssl")]
    pub verify_ssl: bool,

    /// Optional source name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Requirement specification (simple specifier string or detailed table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementSpec {
    /// Simple specifier string ("==1.10.9", "*")
    Simple(String),

    /// Detailed specification with extras
    Detailed {
        /// Version specifier
        #[serde(skip_serializing_if = "Option::is_none")]
        version: Option<String>,

        /// Extras to enable
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        extras: Vec<String>,
    },
}

/// `[requires]` section: interpreter requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiresSection {
    /// Target interpreter version ("3.6")
    pub interpreter: String,
}

/// Default value for verify-ssl (true)
fn default_verify_ssl() -> bool {
    true
}

impl RequirementSpec {
    /// Get the parsed specifier set; a detailed spec without a version
    /// places no constraint
    pub fn specifier_set(&self) -> Result<SpecifierSet, VetchError> {
        match self {
            RequirementSpec::Simple(raw) => SpecifierSet::from_str(raw),
            RequirementSpec::Detailed {
                version: Some(raw), ..
            } => SpecifierSet::from_str(raw),
            RequirementSpec::Detailed { version: None, .. } => return Ok(SpecifierSet::any()),
        }
        .map_err(|e| VetchError::InvalidSpecifier {
            name: String::new(),
            reason: e.to_string(),
        })
    }

    /// Extras requested by this specification
    pub fn extras(&self) -> &[String] {
        match self {
            RequirementSpec::Simple(_) => &[],
            RequirementSpec::Detailed { extras, .. } => extras,
        }
    }

    /// Raw specifier string as declared, if any
    pub fn raw_specifier(&self) -> Option<&str> {
        match self {
            RequirementSpec::Simple(raw) => Some(raw),
            RequirementSpec::Detailed { version, .. } => version.as_deref(),
        }
    }
}

impl Manifest {
    /// An empty manifest with no sections
    pub fn empty() -> Self {
        Self {
            source: None,
            packages: IndexMap::new(),
            dev_packages: IndexMap::new(),
            requires: None,
        }
    }

    /// The raw entries of a dependency group, in declaration order
    pub fn group(&self, group: Group) -> &IndexMap<String, RequirementSpec> {
        match group {
            Group::Runtime => &self.packages,
            Group::Dev => &self.dev_packages,
        }
    }

    /// Typed requirements of a dependency group, in declaration order
    pub fn requirements(&self, group: Group) -> ManifestResult<Vec<Requirement>> {
        self.group(group)
            .iter()
            .map(|(name, spec)| {
                let specifier =
                    spec.specifier_set()
                        .map_err(|e| name_specifier_error(name, e))?;
                Ok(Requirement {
                    name: name.clone(),
                    extras: spec.extras().to_vec(),
                    specifier,
                    group,
                })
            })
            .collect()
    }

    /// The parsed interpreter constraint, if declared
    pub fn interpreter_constraint(&self) -> ManifestResult<Option<InterpreterConstraint>> {
        match &self.requires {
            None => Ok(None),
            Some(requires) => InterpreterConstraint::from_str(&requires.interpreter)
                .map(Some)
                .map_err(|e| VetchError::Validation {
                    field: "requires.interpreter".to_string(),
                    reason: e.to_string(),
                }),
        }
    }
}

/// Attach the requirement name to a specifier error
fn name_specifier_error(name: &str, err: VetchError) -> VetchError {
    match err {
        VetchError::InvalidSpecifier { reason, .. } => VetchError::InvalidSpecifier {
            name: name.to_string(),
            reason,
        },
        other => other,
    }
}

/// Parse TOML string to a validated Manifest
pub fn parse_manifest(content: &str) -> ManifestResult<Manifest> {
    // First pass with toml_edit for located syntax errors
    content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| VetchError::ManifestParse {
            message: e.to_string(),
        })?;

    // Then parse with serde for type safety
    let manifest: Manifest = ::toml::from_str(content).map_err(|e| VetchError::ManifestParse {
        message: e.to_string(),
    })?;

    validate_manifest(&manifest)?;

    Ok(manifest)
}

/// Serialize a Manifest to canonical TOML
pub fn serialize_manifest(manifest: &Manifest) -> ManifestResult<String> {
    ::toml::to_string_pretty(manifest).map_err(|e| VetchError::ManifestParse {
        message: e.to_string(),
    })
}

/// Validate manifest well-formedness
pub fn validate_manifest(manifest: &Manifest) -> ManifestResult<()> {
    if let Some(source) = &manifest.source {
        if source.url.is_empty() {
            return Err(VetchError::Validation {
                field: "source.url".to_string(),
                reason: "source URL must not be empty".to_string(),
            });
        }
        if !source.url.starts_with("http://") && !source.url.starts_with("https://") {
            return Err(VetchError::Validation {
                field: "source.url".to_string(),
                reason: format!("'{}' is not an http(s) URL", source.url),
            });
        }
    }

    for group in [Group::Runtime, Group::Dev] {
        validate_group(manifest, group)?;
    }

    // Interpreter requirement must be a syntactically valid version
    manifest.interpreter_constraint()?;

    Ok(())
}

/// Validate one dependency group: names, specifiers and uniqueness
fn validate_group(manifest: &Manifest, group: Group) -> ManifestResult<()> {
    let mut seen: HashSet<String> = HashSet::new();

    for (name, spec) in manifest.group(group) {
        if !Requirement::is_valid_name(name) {
            return Err(VetchError::Validation {
                field: format!("{}.{}", group.section(), name),
                reason: "package names are alphanumeric and may contain '-', '_' or '.'"
                    .to_string(),
            });
        }

        // TOML rejects literal duplicate keys, so uniqueness is checked
        // over normalized names ("My-Pkg" vs "my_pkg")
        if !seen.insert(normalize_name(name)) {
            return Err(VetchError::DuplicateRequirement {
                name: name.clone(),
                group: group.section().to_string(),
            });
        }

        spec.specifier_set()
            .map_err(|e| name_specifier_error(name, e))?;

        for extra in spec.extras() {
            if extra.is_empty() {
                return Err(VetchError::Validation {
                    field: format!("{}.{}.extras", group.section(), name),
                    reason: "extras must not be empty strings".to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Load and parse a manifest from a file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ManifestResult<Manifest> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| VetchError::io(format!("Failed to read {}", path), e))?;

    parse_manifest(&content).map_err(|e| match e {
        VetchError::ManifestParse { message } => VetchError::ManifestParse {
            message: format!("In file {}: {}", path, message),
        },
        other => other,
    })
}
