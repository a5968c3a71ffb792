//! `vetch add` command implementation.
//!
//! Adds a requirement to the manifest with a format-preserving edit.

use super::CommandContext;
use vetch_core::error::{VetchError, VetchResult};
use vetch_core::types::Group;
use vetch_manifest::add_requirement;

/// Execute the `vetch add` command
pub async fn execute(
    package: String,
    version: Option<String>,
    extras: Vec<String>,
    dev: bool,
    ctx: &CommandContext,
) -> VetchResult<()> {
    let path = ctx.resolve_manifest_path()?;
    let group = if dev { Group::Dev } else { Group::Runtime };
    let specifier = version.unwrap_or_else(|| "*".to_string());

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| VetchError::io(format!("Failed to read {}", path), e))?;

    let edited = add_requirement(&content, &package, &specifier, &extras, group)?;

    tokio::fs::write(&path, edited)
        .await
        .map_err(|e| VetchError::io(format!("Failed to write {}", path), e))?;

    ctx.output.success(&format!(
        "Added {} = \"{}\" to [{}]",
        package,
        specifier,
        group.section()
    ));

    Ok(())
}
