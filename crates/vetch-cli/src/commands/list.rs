//! `vetch list` command implementation.
//!
//! Prints the declared requirements, optionally as JSON.

use super::CommandContext;
use serde_json::json;
use vetch_core::error::{VetchError, VetchResult};
use vetch_core::types::{Group, Requirement};

/// Execute the `vetch list` command
pub async fn execute(dev: bool, runtime: bool, json: bool, ctx: &CommandContext) -> VetchResult<()> {
    let (manifest, _path) = ctx.loader()?.load().await?;

    let groups: &[Group] = match (dev, runtime) {
        (true, _) => &[Group::Dev],
        (_, true) => &[Group::Runtime],
        _ => &[Group::Runtime, Group::Dev],
    };

    let mut requirements: Vec<Requirement> = Vec::new();
    for group in groups {
        requirements.extend(manifest.requirements(*group)?);
    }

    if json {
        let entries: Vec<_> = requirements
            .iter()
            .map(|req| {
                json!({
                    "name": req.name,
                    "specifier": req.specifier.to_string(),
                    "extras": req.extras,
                    "group": req.group.section(),
                })
            })
            .collect();

        let rendered = serde_json::to_string_pretty(&entries)
            .map_err(|e| VetchError::ManifestParse {
                message: format!("Failed to render JSON: {}", e),
            })?;
        ctx.output.plain(&rendered);
        return Ok(());
    }

    for group in groups {
        let in_group: Vec<&Requirement> = requirements
            .iter()
            .filter(|req| req.group == *group)
            .collect();

        ctx.output.plain(&format!("[{}]", group.section()));
        if in_group.is_empty() {
            ctx.output.info("  (none)");
        }
        for req in in_group {
            let extras = if req.extras.is_empty() {
                String::new()
            } else {
                format!(" [{}]", req.extras.join(", "))
            };
            ctx.output
                .plain(&format!("  {} {}{}", req.name, req.specifier, extras));
        }
    }

    Ok(())
}
