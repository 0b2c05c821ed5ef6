//! Removal Service - the cascade-removal engine.
//!
//! This service coordinates the whole removal workflow:
//! 1. Expand the requested component into its cascade candidate set
//! 2. Revoke the parent link on every candidate in the registry
//! 3. Persist the registry
//! 4. Delete the trees of the entries the registry confirmed unreferenced
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::{error, info, instrument, warn};

use crate::{
    application::ports::{ComponentFilesystem, RegistryStore},
    domain::{
        ComponentKind, DeleteOutcome, DomainError, ParentLink, Registry, RepoIdentity,
        component_path, resolve_dependents,
    },
    error::PipekitResult,
};

/// What a removal actually did.
///
/// `removed` lists components whose registry entry was deleted *and* whose
/// tree is gone from disk (deleted now, or already absent). `kept` lists
/// cascade candidates still justified by another parent. `failed` lists
/// components whose entry was deleted but whose tree could not be removed;
/// their directories are orphans detectable by the reconciliation audit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemovalReport {
    pub removed: Vec<String>,
    pub kept: Vec<String>,
    pub failed: Vec<String>,
    /// A stale registry entry (no files on disk) was purged instead of a
    /// removal being performed.
    pub purged_stale: bool,
}

impl RemovalReport {
    pub fn any_removed(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Main removal service.
///
/// Orchestrates candidate resolution, registry mutation, and physical
/// deletion. The repository identity and project directory come from the
/// calling context and are passed through unchanged.
pub struct RemovalService {
    store: Box<dyn RegistryStore>,
    filesystem: Box<dyn ComponentFilesystem>,
    repo: RepoIdentity,
    project_dir: PathBuf,
}

impl RemovalService {
    /// Create a new removal service with the given adapters.
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

    /// Remove an installed component and every dependent that becomes
    /// unreferenced as a result.
    ///
    /// Fails with [`DomainError::NotInstalled`] only when the component has
    /// neither a registry entry nor an on-disk directory. A registry entry
    /// whose directory is gone is reconciled: the stale entry is dropped
    /// and the operation reports no physical removal.
    #[instrument(skip_all, fields(kind = %kind, component = %name))]
    pub fn remove(&self, kind: ComponentKind, name: &str) -> PipekitResult<RemovalReport> {
        let mut registry = self.store.load()?;
        let dir = component_path(&self.project_dir, kind, &self.repo.repo_path, name);

        if !self.filesystem.exists(&dir) {
            if registry.lookup(&self.repo, kind, name).is_some() {
                return self.purge_stale(registry, kind, name);
            }
            return Err(DomainError::NotInstalled {
                kind,
                name: name.to_owned(),
            }
            .into());
        }

        // The parent link being revoked: a module requested directly gives
        // up its direct installation; a subworkflow revokes itself as the
        // parent of its whole dependent set.
        let parent_link = match kind {
            ComponentKind::Module => ParentLink::Direct,
            ComponentKind::Subworkflow => ParentLink::Subworkflow(name.to_owned()),
        };

        let mut candidates: IndexMap<String, ComponentKind> = IndexMap::new();
        candidates.insert(name.to_owned(), kind);
        if kind == ComponentKind::Subworkflow {
            candidates.extend(resolve_dependents(&registry, &self.repo, kind, name));
        }
        info!(candidates = candidates.len(), "Cascade candidate set resolved");

        let mut unreferenced: Vec<(String, ComponentKind)> = Vec::new();
        let mut kept: Vec<String> = Vec::new();
        for (candidate, candidate_kind) in &candidates {
            match registry.delete_if_unreferenced(&self.repo, *candidate_kind, candidate, &parent_link)
            {
                DeleteOutcome::Removed => unreferenced.push((candidate.clone(), *candidate_kind)),
                DeleteOutcome::Kept => {
                    info!(component = %candidate, "Still referenced, keeping");
                    kept.push(candidate.clone());
                }
                DeleteOutcome::Missing => {
                    warn!(component = %candidate, "No registry entry for candidate, skipping");
                }
            }
        }

        // Registry state is authoritative. Persist it before touching any
        // files, and never roll it back if a deletion fails afterwards.
        self.store.save(&registry)?;

        let mut report = RemovalReport {
            kept,
            ..RemovalReport::default()
        };
        for (candidate, candidate_kind) in unreferenced {
            let path =
                component_path(&self.project_dir, candidate_kind, &self.repo.repo_path, &candidate);
            match self.filesystem.delete_tree(&path) {
                Ok(true) => {
                    info!(component = %candidate, "Removed");
                    report.removed.push(candidate);
                }
                Ok(false) => {
                    warn!(component = %candidate, "Directory was already absent");
                    report.removed.push(candidate);
                }
                Err(e) => {
                    error!(component = %candidate, error = %e, "Failed to delete component tree");
                    report.failed.push(candidate);
                }
            }
        }

        Ok(report)
    }

    /// Reconciliation: the registry claims the component but its files are
    /// gone. Drop the entry so it stops haunting the registry.
    fn purge_stale(
        &self,
        mut registry: Registry,
        kind: ComponentKind,
        name: &str,
    ) -> PipekitResult<RemovalReport> {
        warn!(kind = %kind, component = %name, "Directory missing, purging stale registry entry");
        registry.purge_entry(&self.repo, kind, name);
        self.store.save(&registry)?;
        Ok(RemovalReport {
            purged_stale: true,
            ..RemovalReport::default()
        })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use crate::application::ports::{MockComponentFilesystem, MockRegistryStore};
    use crate::domain::ComponentRecord;
    use crate::error::PipekitError;
    use crate::application::ApplicationError;

    fn repo() -> RepoIdentity {
        RepoIdentity::new("https://github.com/pipekit/components.git", "pipekit")
    }

    fn record(parents: &[&str]) -> ComponentRecord {
        let mut r = ComponentRecord::new("main", "deadbeef");
        for p in parents {
            r.add_parent(ParentLink::from_name(*p));
        }
        r
    }

    /// Captures of the side effects a removal performs.
    struct Effects {
        saved: Arc<Mutex<Option<Registry>>>,
        deleted: Arc<Mutex<Vec<PathBuf>>>,
    }

    /// Wire a service over mock ports: `registry` is what load returns,
    /// `missing_dirs` are component directories that do not exist on disk.
    fn service(registry: Registry, missing_dirs: &[&str]) -> (RemovalService, Effects) {
        let saved = Arc::new(Mutex::new(None));
        let deleted = Arc::new(Mutex::new(Vec::new()));

        let mut store = MockRegistryStore::new();
        store.expect_load().returning(move || Ok(registry.clone()));
        let saved_clone = Arc::clone(&saved);
        store.expect_save().returning(move |r: &Registry| {
            *saved_clone.lock().unwrap() = Some(r.clone());
            Ok(())
        });

        let missing: Vec<PathBuf> = missing_dirs.iter().map(|d| PathBuf::from(*d)).collect();
        let mut filesystem = MockComponentFilesystem::new();
        filesystem
            .expect_exists()
            .returning(move |p: &Path| !missing.iter().any(|m| p.ends_with(m)));
        let deleted_clone = Arc::clone(&deleted);
        filesystem.expect_delete_tree().returning(move |p: &Path| {
            deleted_clone.lock().unwrap().push(p.to_path_buf());
            Ok(true)
        });

        let svc = RemovalService::new(
            Box::new(store),
            Box::new(filesystem),
            repo(),
            "/pipeline",
        );
        (svc, Effects { saved, deleted })
    }

    #[test]
    fn removing_an_unknown_component_fails_without_mutation() {
        let (svc, effects) = service(Registry::new(), &["modules/pipekit/ghost"]);
        let err = svc.remove(ComponentKind::Module, "ghost").unwrap_err();
        assert!(matches!(
            err,
            PipekitError::Domain(DomainError::NotInstalled { .. })
        ));
        assert!(effects.saved.lock().unwrap().is_none());
    }

    #[test]
    fn direct_module_removal_deletes_entry_and_files() {
        let mut registry = Registry::new();
        registry.upsert(&repo(), ComponentKind::Module, "fastqc", record(&["direct"]));

        let (svc, effects) = service(registry, &[]);
        let report = svc.remove(ComponentKind::Module, "fastqc").unwrap();

        assert!(report.any_removed());
        assert_eq!(report.removed, vec!["fastqc"]);
        assert!(effects.saved.lock().unwrap().as_ref().unwrap().is_empty());
        let deleted = effects.deleted.lock().unwrap();
        assert_eq!(deleted.as_slice(), [PathBuf::from("/pipeline/modules/pipekit/fastqc")]);
    }

    #[test]
    fn transitive_cascade_keeps_shared_dependents() {
        // SW1 (direct), M1 [SW1], M2 [SW1, SW2], SW2 (direct).
        // Removing SW1 removes SW1 and M1 but keeps M2 with [SW2].
        let mut registry = Registry::new();
        registry.upsert(&repo(), ComponentKind::Subworkflow, "sw1", record(&["direct"]));
        registry.upsert(&repo(), ComponentKind::Subworkflow, "sw2", record(&["direct"]));
        registry.upsert(&repo(), ComponentKind::Module, "m1", record(&["sw1"]));
        registry.upsert(&repo(), ComponentKind::Module, "m2", record(&["sw1", "sw2"]));

        let (svc, effects) = service(registry, &[]);
        let report = svc.remove(ComponentKind::Subworkflow, "sw1").unwrap();

        assert_eq!(report.removed, vec!["sw1", "m1"]);
        assert_eq!(report.kept, vec!["m2"]);

        let saved = effects.saved.lock().unwrap();
        let saved = saved.as_ref().unwrap();
        assert!(saved.lookup(&repo(), ComponentKind::Subworkflow, "sw1").is_none());
        assert!(saved.lookup(&repo(), ComponentKind::Module, "m1").is_none());
        let m2 = saved.lookup(&repo(), ComponentKind::Module, "m2").unwrap();
        assert_eq!(m2.installed_by, vec![ParentLink::Subworkflow("sw2".into())]);
        let sw2 = saved.lookup(&repo(), ComponentKind::Subworkflow, "sw2").unwrap();
        assert!(sw2.is_live());

        let deleted = effects.deleted.lock().unwrap();
        assert!(deleted.contains(&PathBuf::from("/pipeline/subworkflows/pipekit/sw1")));
        assert!(deleted.contains(&PathBuf::from("/pipeline/modules/pipekit/m1")));
        assert!(!deleted.iter().any(|p| p.ends_with("m2")));
    }

    #[test]
    fn stale_entry_is_purged_not_an_error() {
        let mut registry = Registry::new();
        registry.upsert(&repo(), ComponentKind::Module, "fastqc", record(&["direct"]));

        let (svc, effects) = service(registry, &["modules/pipekit/fastqc"]);
        let report = svc.remove(ComponentKind::Module, "fastqc").unwrap();

        assert!(report.purged_stale);
        assert!(!report.any_removed());
        assert!(effects.saved.lock().unwrap().as_ref().unwrap().is_empty());
        assert!(effects.deleted.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_deletion_does_not_roll_back_the_registry() {
        let mut registry = Registry::new();
        registry.upsert(&repo(), ComponentKind::Module, "fastqc", record(&["direct"]));

        let saved = Arc::new(Mutex::new(None));
        let mut store = MockRegistryStore::new();
        store.expect_load().returning(move || Ok(registry.clone()));
        let saved_clone = Arc::clone(&saved);
        store.expect_save().returning(move |r: &Registry| {
            *saved_clone.lock().unwrap() = Some(r.clone());
            Ok(())
        });

        let mut filesystem = MockComponentFilesystem::new();
        filesystem.expect_exists().returning(|_| true);
        filesystem.expect_delete_tree().returning(|p: &Path| {
            Err(PipekitError::Application(ApplicationError::Filesystem {
                path: p.to_path_buf(),
                reason: "permission denied".into(),
            }))
        });

        let svc = RemovalService::new(Box::new(store), Box::new(filesystem), repo(), "/pipeline");
        let report = svc.remove(ComponentKind::Module, "fastqc").unwrap();

        assert!(!report.any_removed());
        assert_eq!(report.failed, vec!["fastqc"]);
        // the save with the entry already gone stands
        assert!(saved.lock().unwrap().as_ref().unwrap().is_empty());
    }
}
