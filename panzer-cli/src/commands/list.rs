//! `panzer list` — registered projects.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use panzer_core::ProjectRecord;

use crate::Services;

/// Arguments for `panzer list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ListJson<'a> {
    projects: &'a [ProjectRecord],
    skipped: Vec<SkippedJson>,
}

#[derive(Serialize)]
struct SkippedJson {
    path: String,
    reason: String,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "path")]
    path: String,
    #[tabled(rename = "updated")]
    updated: String,
}

impl ListArgs {
    pub fn run(self, services: &Services) -> Result<()> {
        let mut report = services.registry.load().with_context(|| {
            format!(
                "failed to load registry at '{}'",
                services.registry.cache_dir().display()
            )
        })?;
        // Enumeration order is unspecified; sort for display only.
        report.projects.sort_by(|a, b| a.name.cmp(&b.name));

        if self.json {
            let payload = ListJson {
                projects: &report.projects,
                skipped: report
                    .skipped
                    .iter()
                    .map(|s| SkippedJson {
                        path: s.path.display().to_string(),
                        reason: s.reason.to_string(),
                    })
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to render project JSON")?
            );
            return Ok(());
        }

        if report.projects.is_empty() {
            println!("No projects registered.");
            println!("Run: panzer new <name> --location <dir>");
        } else {
            let rows = report.projects.iter().map(|p| ProjectRow {
                name: p.name.clone(),
                path: p.fullpath.display().to_string(),
                updated: p.update_date.format("%Y-%m-%d").to_string(),
            });
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{table}");
        }

        for skipped in &report.skipped {
            eprintln!(
                "{} skipped {}: {}",
                "warning:".yellow().bold(),
                skipped.path.display(),
                skipped.reason
            );
        }
        Ok(())
    }
}
