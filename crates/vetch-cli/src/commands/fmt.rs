//! `vetch fmt` command implementation.
//!
//! Rewrites the manifest in canonical serialized form; `--check` only
//! reports whether it would change.

use super::CommandContext;
use vetch_core::error::{VetchError, VetchResult};
use vetch_manifest::toml::{parse_manifest, serialize_manifest};

/// Execute the `vetch fmt` command
pub async fn execute(check: bool, ctx: &CommandContext) -> VetchResult<()> {
    let path = ctx.resolve_manifest_path()?;

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| VetchError::io(format!("Failed to read {}", path), e))?;

    let manifest = parse_manifest(&content)?;
    let canonical = serialize_manifest(&manifest)?;

    if content == canonical {
        ctx.output
            .success(&format!("{} is canonically formatted", path));
        return Ok(());
    }

    if check {
        ctx.output
            .error(&format!("{} is not canonically formatted", path));
        return Err(VetchError::Validation {
            field: "manifest".to_string(),
            reason: "manifest is not canonically formatted (run 'vetch fmt')".to_string(),
        });
    }

    tokio::fs::write(&path, canonical)
        .await
        .map_err(|e| VetchError::io(format!("Failed to write {}", path), e))?;

    ctx.output.success(&format!("Reformatted {}", path));

    Ok(())
}
