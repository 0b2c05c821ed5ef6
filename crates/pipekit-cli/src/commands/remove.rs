//! Implementation of the `pipekit {modules,subworkflows} remove` command.
//!
//! Responsibility: resolve the component name (argument or interactive
//! selection), call the core removal service, and display the report.
//! The cascade semantics live entirely in `pipekit-core`.

use tracing::{info, instrument};

use pipekit_core::domain::{ComponentKind, RepoIdentity};

use crate::{
    cli::{GlobalArgs, RemoveArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the remove command for one component kind.
///
/// Dispatch sequence:
/// 1. Validate the project directory
/// 2. Resolve the component name (prompt when omitted)
/// 3. Confirm with user unless `--yes` or `--quiet`
/// 4. Run the cascade removal
/// 5. Report removed / kept / purged outcomes
#[instrument(skip_all, fields(kind = %kind))]
pub fn execute(
    kind: ComponentKind,
    args: RemoveArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let project = super::project_dir(&global)?;
    let repo = config.repo_identity();

    let name = match args.name {
        Some(name) => name,
        None => select_component(kind, &repo, &project)?,
    };

    if !args.yes && !output.is_quiet() {
        let prompt = format!("Remove {kind} '{name}' and its unused dependents?");
        if !confirm(&prompt)? {
            return Err(CliError::Cancelled);
        }
    }

    info!(component = %name, "Removal started");
    let report = super::removal_service(&project, repo)
        .remove(kind, &name)
        .map_err(CliError::Core)?;

    if report.purged_stale {
        output.warning(&format!(
            "'{name}' was registered but its files are gone; purged the stale entry, nothing removed"
        ))?;
        return Ok(());
    }

    for failed in &report.failed {
        output.error(&format!(
            "Could not delete files for '{failed}'; run 'pipekit check' to reconcile later"
        ))?;
    }

    if report.any_removed() {
        output.success(&format!("Removed: {}", report.removed.join(", ")))?;
        if !report.kept.is_empty() {
            output.info(&format!("Kept (still in use): {}", report.kept.join(", ")))?;
        }
    } else if !report.kept.is_empty() {
        output.info(&format!(
            "Nothing removed: {} still in use elsewhere",
            report.kept.join(", ")
        ))?;
    } else {
        output.warning("Nothing removed")?;
    }

    Ok(())
}

// ── Name selection ────────────────────────────────────────────────────────────

/// Pick a component interactively when no name was given.
#[cfg(feature = "interactive")]
fn select_component(
    kind: ComponentKind,
    repo: &RepoIdentity,
    project: &std::path::Path,
) -> CliResult<String> {
    use std::io::IsTerminal as _;

    use pipekit_adapters::{InstalledComponentCatalog, JsonRegistryStore};
    use pipekit_core::application::ports::ComponentCatalog as _;

    if !std::io::stdin().is_terminal() {
        return Err(CliError::MissingComponentName);
    }

    let catalog = InstalledComponentCatalog::new(
        Box::new(JsonRegistryStore::for_project(project)),
        repo.clone(),
    );
    let names = catalog.installable_names(kind).map_err(CliError::Core)?;
    if names.is_empty() {
        return Err(CliError::InvalidInput {
            message: format!("no {kind}s are installed in this project"),
        });
    }

    let selection = dialoguer::FuzzySelect::new()
        .with_prompt(format!("{kind} name"))
        .items(&names)
        .interact()
        .map_err(|_| CliError::Cancelled)?;

    Ok(names[selection].clone())
}

#[cfg(not(feature = "interactive"))]
fn select_component(
    _kind: ComponentKind,
    _repo: &RepoIdentity,
    _project: &std::path::Path,
) -> CliResult<String> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── UI helpers ────────────────────────────────────────────────────────────────

/// Ask before deleting. Removal is destructive, so an empty answer is "no".
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::{self, Write};

    print!("{prompt} [y/N] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input == "y" || input == "yes")
}
