//! `vetch check` command implementation.
//!
//! Validates the manifest: TOML syntax, specifier syntax, normalized-name
//! uniqueness per group, source URL and interpreter requirement. With
//! `--index`, declared constraints are also checked for satisfiability
//! against a listing of available versions.

use super::CommandContext;
use camino::Utf8PathBuf;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;
use vetch_core::error::{VetchError, VetchResult};
use vetch_core::types::{Group, Version};
use vetch_manifest::toml::load_from_file;
use vetch_manifest::Manifest;
use vetch_resolver::{check_manifest, PackageIndex, RequirementStatus};

/// Execute the `vetch check` command
pub async fn execute(
    manifest: Option<PathBuf>,
    index: Option<PathBuf>,
    ctx: &CommandContext,
) -> VetchResult<()> {
    let path = match manifest {
        Some(explicit) => {
            Utf8PathBuf::from_path_buf(explicit).map_err(|path| VetchError::Validation {
                field: "manifest".to_string(),
                reason: format!("manifest path is not valid UTF-8: {}", path.display()),
            })?
        }
        None => ctx.resolve_manifest_path()?,
    };

    // Loading runs the full validation pass
    let manifest = load_from_file(&path).await?;

    ctx.output.success(&format!("{} is valid", path));

    let runtime = manifest.requirements(Group::Runtime)?;
    let dev = manifest.requirements(Group::Dev)?;
    ctx.output.info(&format!(
        "{} runtime requirement(s), {} dev requirement(s)",
        runtime.len(),
        dev.len()
    ));

    if let Some(source) = &manifest.source {
        let tls = if source.verify_ssl {
            "TLS verified"
        } else {
            "TLS verification off"
        };
        ctx.output.info(&format!("source: {} ({})", source.url, tls));
    }

    if let Some(constraint) = manifest.interpreter_constraint()? {
        ctx.output.info(&format!("interpreter: {}", constraint));
    }

    if let Some(index_path) = index {
        check_against_index(&manifest, &index_path, ctx).await?;
    }

    Ok(())
}

/// Check constraint satisfiability against a version index file
async fn check_against_index(
    manifest: &Manifest,
    index_path: &std::path::Path,
    ctx: &CommandContext,
) -> VetchResult<()> {
    let index = load_index(index_path).await?;
    let report = check_manifest(manifest, &index)?;

    for entry in &report.entries {
        match &entry.status {
            RequirementStatus::Satisfied { best } => {
                ctx.output.info(&format!(
                    "{} {} -> best match {}",
                    entry.requirement.name, entry.requirement.specifier, best
                ));
            }
            RequirementStatus::Unsatisfiable => {
                ctx.output.error(&format!(
                    "{}: no available version satisfies '{}'",
                    entry.requirement.name, entry.requirement.specifier
                ));
            }
            RequirementStatus::UnknownPackage => {
                ctx.output.error(&format!(
                    "{}: not found in the version index",
                    entry.requirement.name
                ));
            }
        }
    }

    let first_failure = report.failures().next();
    match first_failure {
        None => {
            ctx.output.success("All constraints are satisfiable");
            Ok(())
        }
        Some(first) => match &first.status {
            RequirementStatus::UnknownPackage => Err(VetchError::UnknownPackage {
                name: first.requirement.name.clone(),
            }),
            _ => Err(VetchError::Unsatisfiable {
                name: first.requirement.name.clone(),
                constraint: first.requirement.specifier.to_string(),
            }),
        },
    }
}

/// Load a JSON index file mapping package names to version lists
async fn load_index(path: &std::path::Path) -> VetchResult<PackageIndex> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| VetchError::io(format!("Failed to read {}", path.display()), e))?;

    let listing: BTreeMap<String, Vec<String>> =
        serde_json::from_str(&content).map_err(|e| VetchError::Validation {
            field: "index".to_string(),
            reason: format!("invalid version index: {}", e),
        })?;

    let mut index = PackageIndex::new();
    for (name, raw_versions) in listing {
        let versions = raw_versions
            .iter()
            .map(|raw| {
                Version::from_str(raw).map_err(|e| VetchError::Validation {
                    field: format!("index.{}", name),
                    reason: e.to_string(),
                })
            })
            .collect::<VetchResult<Vec<_>>>()?;
        index.insert(&name, versions);
    }

    Ok(index)
}
