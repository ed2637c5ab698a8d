//! `panzer new <name> [--location <dir>]`

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;

use panzer_core::{ProjectName, ProjectScaffolder, ScaffoldOutcome};

use crate::Services;

/// Scaffold a new project and register it.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Project name: letters, digits and underscores only.
    pub name: String,

    /// Parent directory for the project. Defaults to the current directory.
    #[arg(long, short = 'l', value_name = "DIR")]
    pub location: Option<PathBuf>,
}

impl NewArgs {
    pub fn run(self, services: &Services) -> Result<()> {
        let name = ProjectName::parse(&self.name)
            .with_context(|| format!("invalid project name '{}'", self.name))?;
        let location = self.location.unwrap_or_else(|| PathBuf::from("."));

        let scaffolder = ProjectScaffolder::new(&services.registry, &services.storage);
        scaffolder
            .validate_location(&location)
            .with_context(|| format!("cannot create a project in '{}'", location.display()))?;

        let result = scaffolder.scaffold(&location, &name);
        let partial = matches!(&result, Err(err) if err.leaves_partial_state());
        let outcome = ScaffoldOutcome::from(result);

        match outcome.project {
            Some(project) if outcome.success => {
                println!("{} {}", "✓".green().bold(), outcome.message);
                println!("  Project: {}", project.name);
                println!("  Path:    {}", project.fullpath.display());
                Ok(())
            }
            _ => {
                if partial {
                    eprintln!(
                        "{} partially created files were left in '{}'",
                        "warning:".yellow().bold(),
                        location.join(name.as_str()).display()
                    );
                }
                Err(anyhow!(outcome.message))
            }
        }
    }
}
