//! Panzer — project launcher for the zEngine editor.
//!
//! # Usage
//!
//! ```text
//! panzer list [--json]
//! panzer new <name> [--location <dir>]
//! panzer delete <name> [--yes]
//! panzer open <name> [--timeout <secs>]
//! ```
//!
//! Global flags `--cache-dir`, `--editor-dir` and `--settings` override
//! `./panzer.yaml`.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{delete::DeleteArgs, list::ListArgs, new::NewArgs, open::OpenArgs};
use panzer_core::settings::SETTINGS_FILE_NAME;
use panzer_core::{LocalStorage, ProjectRegistry, Settings};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "panzer",
    version,
    about = "Create, list, delete and open zEngine projects",
    long_about = None,
)]
struct Cli {
    /// Settings file (defaults to ./panzer.yaml when present).
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Directory holding the project registry.
    #[arg(long, global = true, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Editor install directory.
    #[arg(long, global = true, value_name = "DIR")]
    editor_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered projects.
    List(ListArgs),

    /// Scaffold a new project and register it.
    New(NewArgs),

    /// Delete a project's registry entry and its directory tree.
    Delete(DeleteArgs),

    /// Open a project in the editor.
    Open(OpenArgs),
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// Everything a command needs, built once in `main` and passed down.
pub struct Services {
    pub settings: Settings,
    pub registry: ProjectRegistry,
    pub storage: LocalStorage,
}

impl Services {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let path = cli
            .settings
            .clone()
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME));
        let mut settings = Settings::load_file(&path)
            .with_context(|| format!("failed to load settings from '{}'", path.display()))?;
        if let Some(dir) = &cli.cache_dir {
            settings.cache_dir = dir.clone();
        }
        if let Some(dir) = &cli.editor_dir {
            settings.editor_dir = dir.clone();
        }

        tracing::debug!(?settings, "resolved settings");

        Ok(Self {
            registry: ProjectRegistry::new(&settings.cache_dir),
            storage: LocalStorage,
            settings,
        })
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let services = Services::from_cli(&cli)?;
    match cli.command {
        Commands::List(args) => args.run(&services),
        Commands::New(args) => args.run(&services),
        Commands::Delete(args) => args.run(&services),
        Commands::Open(args) => args.run(&services),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
