//! Command handlers.
//!
//! Each handler translates CLI arguments into core service calls and
//! displays the result. No registry logic lives here.

pub mod check;
pub mod completions;
pub mod info;
pub mod list;
pub mod remove;

use std::path::{Path, PathBuf};

use pipekit_adapters::{JsonRegistryStore, LocalComponentFilesystem};
use pipekit_core::{
    application::{AuditService, RemovalService},
    domain::RepoIdentity,
};

use crate::{
    cli::GlobalArgs,
    error::{CliError, CliResult},
};

/// Validate the project directory from `--dir`.
pub(crate) fn project_dir(global: &GlobalArgs) -> CliResult<PathBuf> {
    if !global.dir.is_dir() {
        return Err(CliError::ProjectNotFound {
            path: global.dir.clone(),
        });
    }
    Ok(global.dir.clone())
}

pub(crate) fn removal_service(project: &Path, repo: RepoIdentity) -> RemovalService {
    RemovalService::new(
        Box::new(JsonRegistryStore::for_project(project)),
        Box::new(LocalComponentFilesystem::new()),
        repo,
        project,
    )
}

pub(crate) fn audit_service(project: &Path, repo: RepoIdentity) -> AuditService {
    AuditService::new(
        Box::new(JsonRegistryStore::for_project(project)),
        Box::new(LocalComponentFilesystem::new()),
        repo,
        project,
    )
}
