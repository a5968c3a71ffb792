//! Command implementations and dispatch logic.
//!
//! This module contains all command handlers and the central dispatch
//! system. Each command is an async function taking a CommandContext.

use camino::Utf8PathBuf;
use std::path::PathBuf;
use tracing::info;
use vetch_core::error::{VetchError, VetchResult};
use vetch_manifest::ManifestLoader;

pub mod add;
pub mod check;
pub mod fmt;
pub mod init;
pub mod list;
pub mod remove;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub fn new() -> VetchResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| VetchError::io("Failed to get current directory".to_string(), e))?;

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
        })
    }

    /// Working directory as a UTF-8 path
    pub fn utf8_cwd(&self) -> VetchResult<Utf8PathBuf> {
        Utf8PathBuf::from_path_buf(self.cwd.clone()).map_err(|path| VetchError::Validation {
            field: "cwd".to_string(),
            reason: format!("working directory is not valid UTF-8: {}", path.display()),
        })
    }

    /// Manifest loader rooted at the working directory
    pub fn loader(&self) -> VetchResult<ManifestLoader> {
        Ok(ManifestLoader::new(self.utf8_cwd()?))
    }

    /// Locate the project manifest for in-place edits
    pub fn resolve_manifest_path(&self) -> VetchResult<Utf8PathBuf> {
        self.loader()?.resolve_manifest_path()
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> VetchResult<()> {
    match command {
        Commands::Init => {
            info!("Initializing manifest in current directory");
            init::execute(ctx).await
        }
        Commands::Check { manifest, index } => {
            info!("Checking manifest (explicit path: {:?})", manifest);
            check::execute(manifest, index, ctx).await
        }
        Commands::Add {
            package,
            version,
            extras,
            dev,
        } => {
            info!("Adding requirement: {} (dev: {})", package, dev);
            add::execute(package, version, extras, dev, ctx).await
        }
        Commands::Remove { package, dev } => {
            info!("Removing requirement: {} (dev: {})", package, dev);
            remove::execute(package, dev, ctx).await
        }
        Commands::List { dev, runtime, json } => {
            info!("Listing requirements (dev: {}, runtime: {})", dev, runtime);
            list::execute(dev, runtime, json, ctx).await
        }
        Commands::Fmt { check } => {
            info!("Formatting manifest (check: {})", check);
            fmt::execute(check, ctx).await
        }
        Commands::Version => show_version(ctx),
    }
}

/// Handle a bare word that is not a known subcommand
pub fn handle_unknown_word(word: &str, ctx: &CommandContext) -> VetchResult<()> {
    ctx.output.error(&format!("Unknown command '{}'", word));
    if let Some(suggestion) = suggest_similar_command(word) {
        ctx.output.info(&format!("Did you mean '{}'?", suggestion));
    }
    ctx.output.info("Run 'vetch help' to see available commands.");

    Err(VetchError::Validation {
        field: "command".to_string(),
        reason: format!("Unknown command: {}", word),
    })
}

/// Show help information
pub fn show_help(ctx: &CommandContext) -> VetchResult<()> {
    ctx.output.plain("vetch - dependency manifest toolkit");
    ctx.output.plain("");
    ctx.output.plain("Usage: vetch [COMMAND] [OPTIONS]");
    ctx.output.plain("");
    ctx.output.plain("Manifest:");
    ctx.output.plain("  init            Create a starter vetch.toml");
    ctx.output.plain("  check           Validate the manifest");
    ctx.output.plain("  fmt             Rewrite the manifest in canonical form");
    ctx.output.plain("");
    ctx.output.plain("Requirements:");
    ctx.output.plain("  add <pkg>       Add a requirement");
    ctx.output.plain("  remove <pkg>    Remove a requirement");
    ctx.output.plain("  list            List declared requirements");
    ctx.output.plain("");
    ctx.output.plain("Meta:");
    ctx.output.plain("  version         Show version information");
    ctx.output.plain("");
    ctx.output.plain("Run 'vetch <command> --help' for more information on a command.");
    Ok(())
}

/// Show version information
fn show_version(ctx: &CommandContext) -> VetchResult<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("BUILD_DATE");
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.plain(&format!("vetch v{}", version));
    ctx.output.plain(&format!("Built: {}", build_date));
    ctx.output.plain(&format!("Target: {}", target));
    ctx.output.plain(&format!("Rust: {}", env!("RUSTC_VERSION")));

    Ok(())
}

/// Suggest similar commands based on edit distance
pub fn suggest_similar_command(input: &str) -> Option<String> {
    let commands = [
        "init", "check", "add", "remove", "list", "fmt", "version", "help",
    ];

    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for &command in &commands {
        let distance = edit_distance(input, command);
        if distance < best_distance && distance <= 2 {
            best_distance = distance;
            best_match = Some(command);
        }
    }

    best_match.map(|s| s.to_string())
}

/// Calculate edit distance between two strings
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = std::cmp::min(
                std::cmp::min(matrix[i - 1][j] + 1, matrix[i][j - 1] + 1),
                matrix[i - 1][j - 1] + cost,
            );
        }
    }

    matrix[a_len][b_len]
}
