//! `panzer delete <name> [--yes]`

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use panzer_core::RegistryError;

use crate::Services;

/// Delete a project's registry entry and its directory tree.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Name of the registered project.
    pub name: String,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl DeleteArgs {
    pub fn run(self, services: &Services) -> Result<()> {
        let record = services
            .registry
            .find(&self.name)
            .with_context(|| format!("cannot delete '{}'", self.name))?;

        if !self.yes && !confirm(&format!(
            "Delete '{}' and everything under {}? [y/N] ",
            record.name,
            record.fullpath.display()
        ))? {
            println!("Aborted.");
            return Ok(());
        }

        match services.registry.delete(&record) {
            Ok(()) => {
                println!("{} Deleted '{}'", "✓".green().bold(), record.name);
                Ok(())
            }
            Err(err @ RegistryError::PartialDelete { .. }) => {
                eprintln!(
                    "{} registry entry for '{}' was removed",
                    "warning:".yellow().bold(),
                    record.name
                );
                Err(err).context("project directory was not deleted")
            }
            Err(err) => Err(err).with_context(|| format!("failed to delete '{}'", record.name)),
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush().context("failed to flush prompt")?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
