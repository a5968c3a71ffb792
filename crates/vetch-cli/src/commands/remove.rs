//! `vetch remove` command implementation.
//!
//! Removes a requirement from the manifest with a format-preserving edit.

use super::CommandContext;
use vetch_core::error::{VetchError, VetchResult};
use vetch_core::types::Group;
use vetch_manifest::remove_requirement;

/// Execute the `vetch remove` command
pub async fn execute(package: String, dev: bool, ctx: &CommandContext) -> VetchResult<()> {
    let path = ctx.resolve_manifest_path()?;
    let group = if dev { Group::Dev } else { Group::Runtime };

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| VetchError::io(format!("Failed to read {}", path), e))?;

    let edited = remove_requirement(&content, &package, group)?;

    tokio::fs::write(&path, edited)
        .await
        .map_err(|e| VetchError::io(format!("Failed to write {}", path), e))?;

    ctx.output
        .success(&format!("Removed {} from [{}]", package, group.section()));

    Ok(())
}
