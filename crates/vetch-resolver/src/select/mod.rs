//! Version selection and satisfiability checking
//!
//! Provides best-match version selection against a specifier set and a
//! per-requirement satisfiability report for a whole manifest.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use tracing::debug;
use vetch_core::types::{normalize_name, Group, Requirement, SpecifierSet, Version};
use vetch_manifest::Manifest;

use crate::ResolverResult;

/// Version selector for finding best matching versions
#[derive(Debug, Clone)]
pub struct VersionSelector {
    /// Available versions in ascending order
    available: BTreeSet<Version>,
}

/// Available versions per package, keyed by normalized name
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    packages: IndexMap<String, VersionSelector>,
}

/// Outcome for a single requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementStatus {
    /// At least one version matches; `best` is the highest
    Satisfied { best: Version },
    /// The package exists but no listed version matches
    Unsatisfiable,
    /// The package is not in the index at all
    UnknownPackage,
}

/// One requirement with its satisfiability outcome
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub requirement: Requirement,
    pub status: RequirementStatus,
}

/// Whole-manifest satisfiability report
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
}

impl VersionSelector {
    /// Create a new selector over the given versions
    pub fn new(versions: Vec<Version>) -> Self {
        Self {
            available: versions.into_iter().collect(),
        }
    }

    /// Select the highest version matching the specifier set
    pub fn select_best(&self, set: &SpecifierSet) -> Option<Version> {
        self.available
            .iter()
            .rev()
            .find(|version| set.matches(version))
            .cloned()
    }

    /// Select the highest stable (non-prerelease) matching version
    pub fn select_best_stable(&self, set: &SpecifierSet) -> Option<Version> {
        self.available
            .iter()
            .rev()
            .filter(|version| !version.is_prerelease())
            .find(|version| set.matches(version))
            .cloned()
    }

    /// Select with a preference for stable releases, falling back to
    /// prereleases only when nothing stable matches
    pub fn select_preferred(&self, set: &SpecifierSet, allow_prerelease: bool) -> Option<Version> {
        if allow_prerelease {
            self.select_best(set)
        } else {
            self.select_best_stable(set)
                .or_else(|| self.select_best(set))
        }
    }

    /// All versions matching the specifier set, ascending
    pub fn find_matching(&self, set: &SpecifierSet) -> Vec<Version> {
        self.available
            .iter()
            .filter(|version| set.matches(version))
            .cloned()
            .collect()
    }

    /// Check if any version satisfies the specifier set
    pub fn has_matching(&self, set: &SpecifierSet) -> bool {
        self.available.iter().any(|version| set.matches(version))
    }

    /// Highest available version
    pub fn highest_version(&self) -> Option<&Version> {
        self.available.iter().next_back()
    }

    /// Lowest available version
    pub fn lowest_version(&self) -> Option<&Version> {
        self.available.iter().next()
    }
}

impl PackageIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the available versions for a package
    pub fn insert(&mut self, name: &str, versions: Vec<Version>) {
        self.packages
            .insert(normalize_name(name), VersionSelector::new(versions));
    }

    /// Look up a package by (normalized) name
    pub fn get(&self, name: &str) -> Option<&VersionSelector> {
        self.packages.get(&normalize_name(name))
    }

    /// Check if a package is listed
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(&normalize_name(name))
    }
}

impl Report {
    /// Check if every requirement was satisfied
    pub fn is_satisfied(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| matches!(entry.status, RequirementStatus::Satisfied { .. }))
    }

    /// Entries that were not satisfied
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|entry| !matches!(entry.status, RequirementStatus::Satisfied { .. }))
    }
}

/// Check every requirement in the manifest against the index.
///
/// Unknown packages and known packages with no matching version are
/// reported separately; neither aborts the check.
pub fn check_manifest(manifest: &Manifest, index: &PackageIndex) -> ResolverResult<Report> {
    let mut report = Report::default();

    for group in [Group::Runtime, Group::Dev] {
        for requirement in manifest.requirements(group)? {
            let status = match index.get(&requirement.name) {
                None => RequirementStatus::UnknownPackage,
                Some(selector) => match selector.select_best(&requirement.specifier) {
                    Some(best) => RequirementStatus::Satisfied { best },
                    None => RequirementStatus::Unsatisfiable,
                },
            };

            debug!(
                name = %requirement.name,
                constraint = %requirement.specifier,
                ?status,
                "checked requirement"
            );

            report.entries.push(ReportEntry {
                requirement,
                status,
            });
        }
    }

    Ok(report)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    proptest! {
        // select_best returns the highest matching version, or None
        // exactly when nothing matches
        #[test]
        fn select_best_is_highest_match(
            triples in prop::collection::btree_set((0u64..10, 0u64..10, 0u64..10), 1..20),
            floor in (0u64..10, 0u64..10),
        ) {
            let versions: Vec<Version> = triples
                .into_iter()
                .map(|(major, minor, patch)| Version::new(major, minor, patch))
                .collect();
            let selector = VersionSelector::new(versions.clone());
            let set = SpecifierSet::from_str(&format!(">={}.{}", floor.0, floor.1)).unwrap();

            match selector.select_best(&set) {
                Some(best) => {
                    prop_assert!(set.matches(&best));
                    for version in &versions {
                        if set.matches(version) {
                            prop_assert!(*version <= best);
                        }
                    }
                }
                None => {
                    prop_assert!(!selector.has_matching(&set));
                    prop_assert!(versions.iter().all(|v| !set.matches(v)));
                }
            }
        }

        // find_matching agrees with has_matching and stays ascending
        #[test]
        fn find_matching_is_ascending(
            triples in prop::collection::btree_set((0u64..10, 0u64..10, 0u64..10), 0..20),
            bound in (0u64..10, 0u64..10),
        ) {
            let versions: Vec<Version> = triples
                .into_iter()
                .map(|(major, minor, patch)| Version::new(major, minor, patch))
                .collect();
            let selector = VersionSelector::new(versions);
            let set = SpecifierSet::from_str(&format!("<{}.{}", bound.0, bound.1)).unwrap();

            let matching = selector.find_matching(&set);
            prop_assert_eq!(selector.has_matching(&set), !matching.is_empty());
            prop_assert!(matching.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert!(matching.iter().all(|v| set.matches(v)));
        }
    }
}
