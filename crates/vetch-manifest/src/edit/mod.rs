//! Format-preserving manifest edits
//!
//! `add_requirement` and `remove_requirement` operate on the raw document
//! through toml_edit, so comments and the ordering of untouched entries
//! survive the edit.

use crate::ManifestResult;
use std::str::FromStr;
use toml_edit::{value, Array, DocumentMut, InlineTable, Item, Table, Value};
use vetch_core::error::VetchError;
use vetch_core::types::{normalize_name, Group, Requirement, SpecifierSet};

/// Add a requirement to a group, preserving document formatting.
///
/// Returns the edited document text. Fails on invalid names or
/// specifiers, and when a normalized-name duplicate already exists in
/// the group.
pub fn add_requirement(
    content: &str,
    name: &str,
    specifier: &str,
    extras: &[String],
    group: Group,
) -> ManifestResult<String> {
    if !Requirement::is_valid_name(name) {
        return Err(VetchError::Validation {
            field: format!("{}.{}", group.section(), name),
            reason: "package names are alphanumeric and may contain '-', '_' or '.'".to_string(),
        });
    }

    SpecifierSet::from_str(specifier).map_err(|e| VetchError::InvalidSpecifier {
        name: name.to_string(),
        reason: e.to_string(),
    })?;

    let mut doc = parse_document(content)?;

    let section = doc
        .entry(group.section())
        .or_insert(Item::Table(Table::new()));
    let table = section.as_table_mut().ok_or_else(|| VetchError::Validation {
        field: group.section().to_string(),
        reason: "section is not a table".to_string(),
    })?;

    let normalized = normalize_name(name);
    if let Some(existing) = table.iter().map(|(key, _)| key.to_string()).find(|key| {
        normalize_name(key) == normalized
    }) {
        return Err(VetchError::DuplicateRequirement {
            name: existing,
            group: group.section().to_string(),
        });
    }

    if extras.is_empty() {
        table.insert(name, value(specifier));
    } else {
        let mut inline = InlineTable::new();
        inline.insert("version", Value::from(specifier));
        let mut array = Array::new();
        for extra in extras {
            array.push(extra.as_str());
        }
        inline.insert("extras", Value::Array(array));
        table.insert(name, value(inline));
    }

    Ok(doc.to_string())
}

/// Remove a requirement from a group, preserving document formatting.
///
/// The entry is matched by normalized name, so `vetch remove my_pkg`
/// removes a `My-Pkg` declaration.
pub fn remove_requirement(content: &str, name: &str, group: Group) -> ManifestResult<String> {
    let mut doc = parse_document(content)?;

    let not_found = || VetchError::RequirementNotFound {
        name: name.to_string(),
        group: group.section().to_string(),
    };

    let table = doc
        .get_mut(group.section())
        .and_then(Item::as_table_mut)
        .ok_or_else(not_found)?;

    let normalized = normalize_name(name);
    let declared = table
        .iter()
        .map(|(key, _)| key.to_string())
        .find(|key| normalize_name(key) == normalized)
        .ok_or_else(not_found)?;

    table.remove(&declared);

    Ok(doc.to_string())
}

fn parse_document(content: &str) -> ManifestResult<DocumentMut> {
    content
        .parse::<DocumentMut>()
        .map_err(|e| VetchError::ManifestParse {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml::parse_manifest;

    const MANIFEST: &str = r#"# project requirements
[source]
url = "https://pypi.org/simple"

[packages]
boto3 = "==1.10.9" # pinned for CI

[dev-packages]
flake8 = "*"
"#;

    #[test]
    fn add_simple_requirement() {
        let edited = add_requirement(MANIFEST, "docopt", "~=0.6", &[], Group::Runtime).unwrap();

        let manifest = parse_manifest(&edited).unwrap();
        assert!(manifest.packages.contains_key("docopt"));

        // Untouched lines keep their comments
        assert!(edited.contains("# project requirements"));
        assert!(edited.contains("# pinned for CI"));
    }

    #[test]
    fn add_requirement_with_extras() {
        let extras = vec!["security".to_string()];
        let edited = add_requirement(MANIFEST, "requests", ">=2.0", &extras, Group::Runtime).unwrap();

        let manifest = parse_manifest(&edited).unwrap();
        let reqs = manifest.requirements(Group::Runtime).unwrap();
        let requests = reqs.iter().find(|r| r.name == "requests").unwrap();
        assert_eq!(requests.extras, vec!["security"]);
    }

    #[test]
    fn add_creates_missing_section() {
        let edited = add_requirement("", "boto3", "==1.10.9", &[], Group::Runtime).unwrap();
        let manifest = parse_manifest(&edited).unwrap();
        assert!(manifest.packages.contains_key("boto3"));
    }

    #[test]
    fn add_to_dev_group() {
        let edited = add_requirement(MANIFEST, "pylint", "*", &[], Group::Dev).unwrap();
        let manifest = parse_manifest(&edited).unwrap();
        assert!(manifest.dev_packages.contains_key("pylint"));
        assert!(!manifest.packages.contains_key("pylint"));
    }

    #[test]
    fn add_rejects_normalized_duplicate() {
        let result = add_requirement(MANIFEST, "BOTO3", "*", &[], Group::Runtime);
        assert!(matches!(
            result,
            Err(VetchError::DuplicateRequirement { ref name, .. }) if name == "boto3"
        ));
    }

    #[test]
    fn add_rejects_invalid_specifier() {
        let result = add_requirement(MANIFEST, "docopt", "=>0.6", &[], Group::Runtime);
        assert!(matches!(result, Err(VetchError::InvalidSpecifier { .. })));
    }

    #[test]
    fn add_rejects_invalid_name() {
        let result = add_requirement(MANIFEST, "bad name", "*", &[], Group::Runtime);
        assert!(matches!(result, Err(VetchError::Validation { .. })));
    }

    #[test]
    fn remove_requirement_by_normalized_name() {
        let edited = remove_requirement(MANIFEST, "Boto3", Group::Runtime).unwrap();
        let manifest = parse_manifest(&edited).unwrap();
        assert!(manifest.packages.is_empty());
        assert!(manifest.dev_packages.contains_key("flake8"));
    }

    #[test]
    fn remove_missing_requirement_fails() {
        let result = remove_requirement(MANIFEST, "docopt", Group::Runtime);
        assert!(matches!(result, Err(VetchError::RequirementNotFound { .. })));

        // Wrong group is also a miss
        let result = remove_requirement(MANIFEST, "flake8", Group::Runtime);
        assert!(matches!(result, Err(VetchError::RequirementNotFound { .. })));
    }
}
