//! `vetch init` command implementation.
//!
//! Creates a starter manifest in the current directory.

use super::CommandContext;
use std::fs;
use vetch_core::error::{VetchError, VetchResult};
use vetch_manifest::MANIFEST_FILENAME;

const STARTER_MANIFEST: &str = r#"[source]
url = "https://pypi.org/simple"
verify-ssl = true

[packages]

[dev-packages]

[requires]
interpreter = "3.6"
"#;

/// Execute the `vetch init` command
pub async fn execute(ctx: &CommandContext) -> VetchResult<()> {
    let manifest_path = ctx.cwd.join(MANIFEST_FILENAME);

    if manifest_path.exists() {
        ctx.output
            .info("vetch.toml already exists, skipping initialization");
        return Ok(());
    }

    fs::write(&manifest_path, STARTER_MANIFEST).map_err(|e| {
        VetchError::io(
            format!("Failed to create {}", manifest_path.display()),
            e,
        )
    })?;

    ctx.output.success("Created vetch.toml");
    ctx.output.info("");
    ctx.output.info("Next steps:");
    ctx.output.info("  vetch add <package> --version \"==1.0.0\"");
    ctx.output.info("  vetch check");

    Ok(())
}
