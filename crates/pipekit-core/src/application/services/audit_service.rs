//! Audit Service - whole-project registry/filesystem reconciliation.
//!
//! `remove` reconciles one component at a time; this service sweeps the
//! entire registry against the component tree and reports divergence in
//! both directions: entries whose directories are gone, and directories
//! no entry owns.

use std::path::PathBuf;

use tracing::{instrument, warn};

use crate::{
    application::ports::{ComponentFilesystem, RegistryStore},
    domain::{ComponentKind, RepoIdentity, component_path, components_root},
    error::PipekitResult,
};

/// Divergence found between the registry and the component tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditReport {
    /// Registry entries whose expected directory does not exist.
    pub stale_entries: Vec<(ComponentKind, String)>,
    /// File-bearing directories under the component roots that no registry
    /// entry accounts for. Never deleted automatically.
    pub untracked_dirs: Vec<(ComponentKind, PathBuf)>,
    /// Stale entries dropped from the registry (fix mode only).
    pub purged: Vec<(ComponentKind, String)>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.stale_entries.is_empty() && self.untracked_dirs.is_empty()
    }
}

/// Reconciliation audit over the whole registry.
pub struct AuditService {
    store: Box<dyn RegistryStore>,
    filesystem: Box<dyn ComponentFilesystem>,
    repo: RepoIdentity,
    project_dir: PathBuf,
}

impl AuditService {
    pub fn new(
        store: Box<dyn RegistryStore>,
        filesystem: Box<dyn ComponentFilesystem>,
        repo: RepoIdentity,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            filesystem,
            repo,
            project_dir: project_dir.into(),
        }
    }

    /// Report divergence without mutating anything.
    pub fn audit(&self) -> PipekitResult<AuditReport> {
        self.run(false)
    }

    /// Report divergence and purge stale entries from the registry.
    /// Untracked directories are only reported — files are never deleted
    /// on the registry's behalf.
    pub fn fix(&self) -> PipekitResult<AuditReport> {
        self.run(true)
    }

    #[instrument(skip_all, fields(fix = fix))]
    fn run(&self, fix: bool) -> PipekitResult<AuditReport> {
        let mut registry = self.store.load()?;
        let mut report = AuditReport::default();

        for kind in [ComponentKind::Module, ComponentKind::Subworkflow] {
            for (name, _) in registry.components(&self.repo, kind) {
                let path = component_path(&self.project_dir, kind, &self.repo.repo_path, name);
                if !self.filesystem.exists(&path) {
                    report.stale_entries.push((kind, name.clone()));
                }
            }

            let root = components_root(&self.project_dir, kind, &self.repo.repo_path);
            let tracked: Vec<PathBuf> = registry
                .components(&self.repo, kind)
                .map(|(name, _)| PathBuf::from(name))
                .collect();
            for dir in self.filesystem.file_bearing_dirs(&root)? {
                // A directory inside a tracked component (tests, nested
                // files) or an ancestor of one is not untracked.
                let owned = tracked
                    .iter()
                    .any(|name| dir.starts_with(name) || name.starts_with(&dir));
                if !owned {
                    report.untracked_dirs.push((kind, dir));
                }
            }
        }

        if fix && !report.stale_entries.is_empty() {
            for (kind, name) in &report.stale_entries {
                warn!(kind = %kind, component = %name, "Purging stale registry entry");
                registry.purge_entry(&self.repo, *kind, name);
                report.purged.push((*kind, name.clone()));
            }
            self.store.save(&registry)?;
        }

        Ok(report)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
