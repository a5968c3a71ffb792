//! Interpreter version constraint.
//!
//! The `[requires]` section of a manifest names the language runtime the
//! packages are installed for. The constraint is a plain version prefix:
//! "3.6" accepts any 3.6.x interpreter.

use super::{PartialVersion, Version};
use super::version::VersionError;
use std::fmt;
use std::str::FromStr;

/// Minimum/target runtime version from the `[requires]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConstraint {
    pub version: PartialVersion,
}

impl InterpreterConstraint {
    /// Check if an available interpreter satisfies this constraint
    pub fn matches(&self, available: &Version) -> bool {
        self.version.matches_prefix(available)
    }
}

impl FromStr for InterpreterConstraint {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = PartialVersion::from_str(s)?;
        if version.prerelease.is_some() {
            return Err(VersionError::InvalidFormat {
                input: s.to_string(),
            });
        }
        Ok(Self { version })
    }
}

impl fmt::Display for InterpreterConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_component_constraint() {
        let c = InterpreterConstraint::from_str("3.6").unwrap();
        assert_eq!(c.version.major, 3);
        assert_eq!(c.version.minor, Some(6));
        assert_eq!(c.to_string(), "3.6");
    }

    #[test]
    fn prefix_matching() {
        let c = InterpreterConstraint::from_str("3.6").unwrap();
        assert!(c.matches(&Version::new(3, 6, 0)));
        assert!(c.matches(&Version::new(3, 6, 12)));
        assert!(!c.matches(&Version::new(3, 7, 0)));
        assert!(!c.matches(&Version::new(2, 7, 18)));

        let major_only = InterpreterConstraint::from_str("3").unwrap();
        assert!(major_only.matches(&Version::new(3, 9, 1)));
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(InterpreterConstraint::from_str("").is_err());
        assert!(InterpreterConstraint::from_str("three.six").is_err());
        assert!(InterpreterConstraint::from_str("3.6-beta").is_err());
    }
}
