//! `panzer open <name> [--timeout <secs>]`

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use panzer_engine::{EngineLauncher, LaunchOptions, LaunchOutcome};

use crate::Services;

/// Open a project in the editor.
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Name of the registered project.
    pub name: String,

    /// Give up waiting for the editor after this many seconds.
    /// Without it (and without `launch_timeout_secs`) the wait is unbounded.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl OpenArgs {
    pub fn run(self, services: &Services) -> Result<()> {
        let record = services
            .registry
            .find(&self.name)
            .with_context(|| format!("cannot open '{}'", self.name))?;

        let launcher = EngineLauncher::from_settings(&services.settings);
        let options = LaunchOptions {
            timeout: self
                .timeout
                .map(Duration::from_secs)
                .or(launcher.options().timeout),
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("failed to build tokio runtime")?;
        let outcome = runtime
            .block_on(launcher.start_with(&record.fullpath, options, async {
                if tokio::signal::ctrl_c().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }))
            .with_context(|| format!("failed to open '{}'", record.name))?;

        match outcome {
            LaunchOutcome::Ready => {
                println!("{} Editor started for '{}'", "✓".green().bold(), record.name);
            }
            LaunchOutcome::Exited { code } => {
                let code = code.map_or_else(|| "none".to_string(), |c| c.to_string());
                println!("Editor exited before becoming ready (exit code {code})");
            }
        }
        Ok(())
    }
}
