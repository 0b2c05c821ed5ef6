//! Implementation of the `pipekit {modules,subworkflows} list` command.

use serde::Serialize;

use pipekit_core::{application::ports::RegistryStore as _, domain::ComponentKind};

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One installed component as shown to the user.
#[derive(Debug, Serialize)]
struct ComponentRow {
    name: String,
    branch: String,
    git_sha: String,
    installed_by: Vec<String>,
}

pub fn execute(
    kind: ComponentKind,
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    use pipekit_adapters::JsonRegistryStore;

    let project = super::project_dir(&global)?;
    let repo = config.repo_identity();

    let registry = JsonRegistryStore::for_project(&project)
        .load()
        .map_err(CliError::Core)?;

    let rows: Vec<ComponentRow> = registry
        .components(&repo, kind)
        .map(|(name, record)| ComponentRow {
            name: name.clone(),
            branch: record.branch.clone(),
            git_sha: record.git_sha.clone(),
            installed_by: record
                .installed_by
                .iter()
                .map(|p| p.as_str().to_owned())
                .collect(),
        })
        .collect();

    match args.format {
        ListFormat::Table => {
            if rows.is_empty() {
                output.info(&format!("No {kind}s installed"))?;
                return Ok(());
            }
            output.header(&format!("Installed {kind}s:"))?;
            for row in &rows {
                output.print(&format!(
                    "  {} @ {} (installed by: {})",
                    row.name,
                    short_sha(&row.git_sha),
                    row.installed_by.join(", ")
                ))?;
            }
        }
        ListFormat::Json => {
            // Serialise to stdout directly (bypasses OutputManager because
            // JSON output must be parseable even in non-TTY pipes).
            let json = serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".into());
            println!("{json}");
        }
        ListFormat::List => {
            for row in &rows {
                println!("{}", row.name);
            }
        }
        ListFormat::Csv => {
            println!("name,branch,git_sha,installed_by");
            for row in &rows {
                println!(
                    "{},{},{},{}",
                    row.name,
                    row.branch,
                    row.git_sha,
                    row.installed_by.join(";")
                );
            }
        }
    }

    Ok(())
}

/// Abbreviate a revision for table display. SHAs are ASCII hex.
fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
