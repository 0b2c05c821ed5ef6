//! Implementation of the `pipekit check` command.
//!
//! Sweeps the registry against the component tree and reports divergence;
//! `--fix` additionally purges registry entries whose files are gone.
//! Untracked directories are reported but never deleted.

use crate::{
    cli::{CheckArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    args: CheckArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let project = super::project_dir(&global)?;
    let service = super::audit_service(&project, config.repo_identity());

    let report = if args.fix {
        service.fix()
    } else {
        service.audit()
    }
    .map_err(CliError::Core)?;

    if report.is_clean() {
        output.success("Registry and component tree are in sync")?;
        return Ok(());
    }

    for (kind, name) in &report.stale_entries {
        if report.purged.contains(&(*kind, name.clone())) {
            output.warning(&format!("Purged stale entry: {kind} '{name}'"))?;
        } else {
            output.warning(&format!("{kind} '{name}' is registered but its files are gone"))?;
        }
    }
    for (kind, dir) in &report.untracked_dirs {
        output.warning(&format!("Untracked {kind} directory: {}", dir.display()))?;
    }

    if args.fix {
        if !report.purged.is_empty() {
            output.success(&format!("Purged {} stale registry entries", report.purged.len()))?;
        }
        if !report.untracked_dirs.is_empty() {
            output.info("Untracked directories are left alone; remove or install them by hand")?;
        }
        return Ok(());
    }

    Err(CliError::OutOfSync {
        issues: report.stale_entries.len() + report.untracked_dirs.len(),
    })
}
