//! Version and version-specifier types.
//!
//! Provides the Version, PartialVersion and SpecifierSet types used to
//! express and evaluate the version constraints found in a manifest.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Concrete version (major.minor.patch-prerelease+build)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

/// Version with possibly missing components ("3", "3.6", "1.2.3")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialVersion {
    pub major: u64,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub prerelease: Option<String>,
}

/// Comparison operator for version specifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Exact,      // ==1.2.3
    NotEqual,   // !=1.2.3
    Greater,    // >1.2.3
    GreaterEq,  // >=1.2.3
    Less,       // <1.2.3
    LessEq,     // <=1.2.3
    Compatible, // ~=1.2 (compatible release)
    Any,        // *
}

/// Single version constraint (operator plus version)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub op: Op,
    pub version: PartialVersion,
}

/// Comma-separated conjunction of specifiers (">=1.0, <2.0")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierSet {
    pub specifiers: Vec<Specifier>,
}

/// Version and specifier parsing errors
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version format: {input}")]
    InvalidFormat { input: String },

    #[error("Invalid number in version: {component}")]
    InvalidNumber { component: String },

    #[error("Empty version specifier")]
    EmptySpecifier,

    #[error("Compatible-release specifier needs at least major.minor: {input}")]
    CompatibleRelease { input: String },
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Check if this version satisfies a specifier set
    pub fn satisfies(&self, set: &SpecifierSet) -> bool {
        set.matches(self)
    }

    /// Check if this is a prerelease version
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Precedence order (build metadata ignored, prerelease < release)
    fn precedence_cmp(&self, other: &Self) -> Ordering {
        match (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch)) {
            Ordering::Equal => match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            },
            other => other,
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        let (version_part, build) = match input.split_once('+') {
            // "1.2.3+" carries no build metadata and is malformed
            Some((_, "")) => {
                return Err(VersionError::InvalidFormat {
                    input: input.to_string(),
                })
            }
            Some((v, b)) => (v, Some(b.to_string())),
            None => (input, None),
        };

        let (core_part, prerelease) = match version_part.split_once('-') {
            // An empty prerelease would display as "1.2.3-" and sort
            // below every named prerelease
            Some((_, "")) => {
                return Err(VersionError::InvalidFormat {
                    input: input.to_string(),
                })
            }
            Some((c, p)) => (c, Some(p.to_string())),
            None => (version_part, None),
        };

        let parts: Vec<&str> = core_part.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        let component = |raw: &str| -> Result<u64, VersionError> {
            raw.parse().map_err(|_| VersionError::InvalidNumber {
                component: raw.to_string(),
            })
        };

        Ok(Version {
            major: component(parts[0])?,
            minor: component(parts[1])?,
            patch: component(parts[2])?,
            prerelease,
            build,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }

        if let Some(ref build) = self.build {
            write!(f, "+{}", build)?;
        }

        Ok(())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence_cmp(other)
    }
}

impl PartialVersion {
    /// Convert to a full version, filling missing parts with 0
    pub fn to_version(&self) -> Version {
        Version {
            major: self.major,
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            prerelease: self.prerelease.clone(),
            build: None,
        }
    }

    /// Check prefix equality ("1.2" matches any 1.2.x)
    pub fn matches_prefix(&self, version: &Version) -> bool {
        version.major == self.major
            && self.minor.map_or(true, |m| version.minor == m)
            && self.patch.map_or(true, |p| version.patch == p)
            && version.prerelease == self.prerelease
    }

    /// Check compatible-release match (~=1.4.2 allows >=1.4.2 <1.5.0,
    /// ~=1.4 allows >=1.4.0 <2.0.0)
    fn matches_compatible(&self, version: &Version) -> bool {
        if version < &self.to_version() {
            return false;
        }
        if self.patch.is_some() {
            // Last given component is patch, so minor is held fixed
            version.major == self.major && Some(version.minor) == self.minor
        } else {
            version.major == self.major
        }
    }
}

impl FromStr for PartialVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        let (core_part, prerelease) = match input.split_once('-') {
            Some((_, "")) => {
                return Err(VersionError::InvalidFormat {
                    input: input.to_string(),
                })
            }
            Some((c, p)) => (c, Some(p.to_string())),
            None => (input, None),
        };

        let parts: Vec<&str> = core_part.split('.').collect();
        if parts.is_empty() || parts.len() > 3 || parts[0].is_empty() {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        let component = |raw: &str| -> Result<u64, VersionError> {
            raw.parse().map_err(|_| VersionError::InvalidNumber {
                component: raw.to_string(),
            })
        };

        Ok(PartialVersion {
            major: component(parts[0])?,
            minor: parts.get(1).map(|p| component(*p)).transpose()?,
            patch: parts.get(2).map(|p| component(*p)).transpose()?,
            prerelease,
        })
    }
}

impl fmt::Display for PartialVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{}", minor)?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }
        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl Specifier {
    /// Parse a single specifier ("==1.2.3", ">=1.0", "~=1.4", "*")
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(VersionError::EmptySpecifier);
        }

        if input == "*" {
            return Ok(Specifier {
                op: Op::Any,
                version: PartialVersion {
                    major: 0,
                    minor: None,
                    patch: None,
                    prerelease: None,
                },
            });
        }

        let (op, version_str) = if let Some(stripped) = input.strip_prefix("==") {
            (Op::Exact, stripped)
        } else if let Some(stripped) = input.strip_prefix("!=") {
            (Op::NotEqual, stripped)
        } else if let Some(stripped) = input.strip_prefix("~=") {
            (Op::Compatible, stripped)
        } else if let Some(stripped) = input.strip_prefix(">=") {
            (Op::GreaterEq, stripped)
        } else if let Some(stripped) = input.strip_prefix("<=") {
            (Op::LessEq, stripped)
        } else if let Some(stripped) = input.strip_prefix(">") {
            (Op::Greater, stripped)
        } else if let Some(stripped) = input.strip_prefix("<") {
            (Op::Less, stripped)
        } else {
            // A bare version is an exact pin
            (Op::Exact, input)
        };

        let version = PartialVersion::from_str(version_str)?;

        if op == Op::Compatible && version.minor.is_none() {
            return Err(VersionError::CompatibleRelease {
                input: input.to_string(),
            });
        }

        Ok(Specifier { op, version })
    }

    /// Check if a version matches this specifier
    pub fn matches(&self, version: &Version) -> bool {
        match self.op {
            Op::Any => true,
            Op::Exact => self.version.matches_prefix(version),
            Op::NotEqual => !self.version.matches_prefix(version),
            Op::Greater => version > &self.version.to_version(),
            Op::GreaterEq => version >= &self.version.to_version(),
            Op::Less => version < &self.version.to_version(),
            Op::LessEq => version <= &self.version.to_version(),
            Op::Compatible => self.version.matches_compatible(version),
        }
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.op {
            Op::Any => return write!(f, "*"),
            Op::Exact => "==",
            Op::NotEqual => "!=",
            Op::Greater => ">",
            Op::GreaterEq => ">=",
            Op::Less => "<",
            Op::LessEq => "<=",
            Op::Compatible => "~=",
        };
        write!(f, "{}{}", symbol, self.version)
    }
}

impl SpecifierSet {
    /// Specifier set matching any version
    pub fn any() -> Self {
        Self {
            specifiers: vec![Specifier {
                op: Op::Any,
                version: PartialVersion {
                    major: 0,
                    minor: None,
                    patch: None,
                    prerelease: None,
                },
            }],
        }
    }

    /// Check if a version matches every specifier in the set
    pub fn matches(&self, version: &Version) -> bool {
        self.specifiers.iter().all(|spec| spec.matches(version))
    }

    /// Check if this set places no constraint at all
    pub fn is_any(&self) -> bool {
        self.specifiers.iter().all(|spec| spec.op == Op::Any)
    }
}

impl FromStr for SpecifierSet {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(VersionError::EmptySpecifier);
        }

        let specifiers = s
            .split(',')
            .map(Specifier::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SpecifierSet { specifiers })
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, spec) in self.specifiers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", spec)?;
        }
        Ok(())
    }
}
