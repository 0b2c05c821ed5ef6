//! Implementation of the `pipekit {modules,subworkflows} info` command.

use pipekit_core::{
    application::ports::RegistryStore as _,
    domain::{ComponentKind, DirectoryState, DomainError, component_path},
};

use crate::{
    cli::{GlobalArgs, InfoArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    kind: ComponentKind,
    args: InfoArgs,
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

    let record = registry.lookup(&repo, kind, &args.name).ok_or_else(|| {
        CliError::Core(
            DomainError::EntryMissing {
                kind,
                name: args.name.clone(),
            }
            .into(),
        )
    })?;

    let dir = component_path(&project, kind, &repo.repo_path, &args.name);
    let state = DirectoryState::from_present(dir.is_dir());
    let parents: Vec<&str> = record.installed_by.iter().map(|p| p.as_str()).collect();

    output.header(&format!("{kind} '{}'", args.name))?;
    output.print(&format!("  Remote:       {}", repo.remote_url))?;
    output.print(&format!("  Repo path:    {}", repo.repo_path))?;
    output.print(&format!("  Branch:       {}", record.branch))?;
    output.print(&format!("  Revision:     {}", record.git_sha))?;
    output.print(&format!("  Installed by: {}", parents.join(", ")))?;
    output.print(&format!("  Directory:    {} ({state})", dir.display()))?;

    if state == DirectoryState::Missing {
        output.warning("Files are missing; 'pipekit check --fix' will purge the stale entry")?;
    }

    Ok(())
}
