//! # vetch-cli
//!
//! Dependency manifest toolkit CLI.
//!
//! This is the main entry point for the vetch tool. It handles command
//! parsing, sets up logging, and dispatches to the command handlers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use vetch_core::error::VetchResult;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Dependency manifest toolkit
#[derive(Parser)]
#[command(name = "vetch", version, about = "Dependency manifest toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Possibly mistyped command word
    #[arg(value_name = "COMMAND", hide = true)]
    pub word: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a starter manifest in the current directory
    Init,
    /// Validate the manifest
    Check {
        /// Explicit manifest path (found by walking up otherwise)
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// JSON file mapping package names to available versions; when
        /// given, constraints are also checked for satisfiability
        #[arg(long)]
        index: Option<PathBuf>,
    },
    /// Add a requirement to the manifest
    Add {
        package: String,
        /// Version specifier ("*" when omitted)
        #[arg(long)]
        version: Option<String>,
        /// Extras to enable
        #[arg(long, value_delimiter = ',')]
        extras: Vec<String>,
        /// Add to the dev-packages group
        #[arg(short = 'D', long)]
        dev: bool,
    },
    /// Remove a requirement from the manifest
    Remove {
        package: String,
        /// Remove from the dev-packages group
        #[arg(short = 'D', long)]
        dev: bool,
    },
    /// List declared requirements
    List {
        /// Only the dev-packages group
        #[arg(long, conflicts_with = "runtime")]
        dev: bool,
        /// Only the packages group
        #[arg(long)]
        runtime: bool,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Rewrite the manifest in canonical form
    Fmt {
        /// Only check; exit non-zero if not canonical
        #[arg(long)]
        check: bool,
    },
    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    info!("Starting vetch v{}", env!("CARGO_PKG_VERSION"));

    if let Err(error) = run_cli(cli) {
        let formatter = ErrorFormatter::new();
        eprintln!("{}", formatter.format_error(&error));
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> VetchResult<()> {
    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        vetch_core::error::VetchError::io("Failed to create async runtime".to_string(), e)
    })?;

    rt.block_on(async {
        let ctx = CommandContext::new()?;

        match cli.command {
            Some(command) => commands::dispatch_command(command, &ctx).await,
            None => match cli.word {
                Some(word) => commands::handle_unknown_word(&word, &ctx),
                None => commands::show_help(&ctx),
            },
        }
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "vetch_cli={},vetch_core={},vetch_manifest={},vetch_resolver={}",
            level, level, level, level
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
