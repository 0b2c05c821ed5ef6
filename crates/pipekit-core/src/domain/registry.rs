//! The in-memory registry of installed components.
//!
//! [`Registry`] mirrors the persisted document exactly: a nested map
//! `remote URL → repo path → section → name → record`. All mutation goes
//! through the operations here so two invariants hold at every point:
//!
//! - a record's `installed_by` set is never left empty — emptying it
//!   deletes the record;
//! - no orphaned partial key paths — deleting the last record of a repo
//!   prunes the enclosing maps (unless foreign keys keep them alive).
//!
//! Key order is preserved across load/save round-trips so saves produce
//! minimal diffs in version control.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::component::{ComponentKind, ComponentRecord, ParentLink, RepoIdentity};

// ── Document shape ────────────────────────────────────────────────────────────

/// Registry keyed by remote catalog URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    remotes: IndexMap<String, RemoteComponents>,
}

/// Components from one remote, keyed by repo path (namespace).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteComponents {
    repos: IndexMap<String, RepoComponents>,
}

/// The two component sections of one (remote, repo path) pair. Foreign
/// sections written by newer tool versions survive in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoComponents {
    #[serde(default)]
    pub modules: IndexMap<String, ComponentRecord>,
    #[serde(default)]
    pub subworkflows: IndexMap<String, ComponentRecord>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RepoComponents {
    fn section(&self, kind: ComponentKind) -> &IndexMap<String, ComponentRecord> {
        match kind {
            ComponentKind::Module => &self.modules,
            ComponentKind::Subworkflow => &self.subworkflows,
        }
    }

    fn section_mut(&mut self, kind: ComponentKind) -> &mut IndexMap<String, ComponentRecord> {
        match kind {
            ComponentKind::Module => &mut self.modules,
            ComponentKind::Subworkflow => &mut self.subworkflows,
        }
    }

    fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.subworkflows.is_empty() && self.extra.is_empty()
    }
}

// ── Operation outcomes ────────────────────────────────────────────────────────

/// Result of [`Registry::delete_if_unreferenced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The last parent link was revoked; the record is gone.
    Removed,
    /// Other parent links remain; the record was kept with a reduced set.
    Kept,
    /// No record exists under that key.
    Missing,
}

// ── Registry operations ───────────────────────────────────────────────────────

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }

    /// Look up one record.
    pub fn lookup(
        &self,
        repo: &RepoIdentity,
        kind: ComponentKind,
        name: &str,
    ) -> Option<&ComponentRecord> {
        self.repo_components(repo)?.section(kind).get(name)
    }

    /// Insert or replace a record wholesale.
    pub fn upsert(
        &mut self,
        repo: &RepoIdentity,
        kind: ComponentKind,
        name: impl Into<String>,
        record: ComponentRecord,
    ) {
        self.repo_components_mut(repo)
            .section_mut(kind)
            .insert(name.into(), record);
    }

    /// Install-side bookkeeping: create the record if absent, refresh its
    /// pinned revision, and add `parent` to its `installed_by` set.
    pub fn record_install(
        &mut self,
        repo: &RepoIdentity,
        kind: ComponentKind,
        name: impl Into<String>,
        branch: impl Into<String>,
        git_sha: impl Into<String>,
        parent: ParentLink,
    ) {
        let record = self
            .repo_components_mut(repo)
            .section_mut(kind)
            .entry(name.into())
            .or_default();
        record.branch = branch.into();
        record.git_sha = git_sha.into();
        record.add_parent(parent);
    }

    /// Revoke one parent link; delete the record if nothing justifies it
    /// any more.
    ///
    /// A `parent` naming the record itself degrades to the direct-install
    /// marker — the top-level subworkflow of a cascade revokes its own
    /// direct installation, not a self-dependency.
    pub fn delete_if_unreferenced(
        &mut self,
        repo: &RepoIdentity,
        kind: ComponentKind,
        name: &str,
        parent: &ParentLink,
    ) -> DeleteOutcome {
        let Some(repo_components) = self.repo_components_opt_mut(repo) else {
            return DeleteOutcome::Missing;
        };
        let section = repo_components.section_mut(kind);
        let Some(record) = section.get_mut(name) else {
            return DeleteOutcome::Missing;
        };

        let direct = ParentLink::Direct;
        let effective = if parent.is_subworkflow(name) { &direct } else { parent };
        record.remove_parent(effective);

        if record.is_live() {
            return DeleteOutcome::Kept;
        }
        section.shift_remove(name);
        self.prune(repo);
        DeleteOutcome::Removed
    }

    /// Drop a record unconditionally (stale-entry reconciliation).
    /// Returns `true` if an entry was actually removed.
    pub fn purge_entry(&mut self, repo: &RepoIdentity, kind: ComponentKind, name: &str) -> bool {
        let Some(repo_components) = self.repo_components_opt_mut(repo) else {
            return false;
        };
        let purged = repo_components.section_mut(kind).shift_remove(name).is_some();
        if purged {
            self.prune(repo);
        }
        purged
    }

    /// Iterate over `(kind, name, record)` for every component of one repo.
    pub fn entries(
        &self,
        repo: &RepoIdentity,
    ) -> impl Iterator<Item = (ComponentKind, &String, &ComponentRecord)> {
        let repo_components = self.repo_components(repo);
        let modules = repo_components
            .map(|r| r.modules.iter())
            .into_iter()
            .flatten()
            .map(|(n, rec)| (ComponentKind::Module, n, rec));
        let subworkflows = repo_components
            .map(|r| r.subworkflows.iter())
            .into_iter()
            .flatten()
            .map(|(n, rec)| (ComponentKind::Subworkflow, n, rec));
        modules.chain(subworkflows)
    }

    /// Iterate over the records of one section, in stored order.
    pub fn components(
        &self,
        repo: &RepoIdentity,
        kind: ComponentKind,
    ) -> impl Iterator<Item = (&String, &ComponentRecord)> {
        self.repo_components(repo)
            .map(|r| r.section(kind).iter())
            .into_iter()
            .flatten()
    }

    /// Names of one section, in stored order.
    pub fn component_names(&self, repo: &RepoIdentity, kind: ComponentKind) -> Vec<String> {
        self.components(repo, kind).map(|(n, _)| n.clone()).collect()
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn repo_components(&self, repo: &RepoIdentity) -> Option<&RepoComponents> {
        self.remotes.get(&repo.remote_url)?.repos.get(&repo.repo_path)
    }

    fn repo_components_opt_mut(&mut self, repo: &RepoIdentity) -> Option<&mut RepoComponents> {
        self.remotes
            .get_mut(&repo.remote_url)?
            .repos
            .get_mut(&repo.repo_path)
    }

    fn repo_components_mut(&mut self, repo: &RepoIdentity) -> &mut RepoComponents {
        self.remotes
            .entry(repo.remote_url.clone())
            .or_default()
            .repos
            .entry(repo.repo_path.clone())
            .or_default()
    }

    /// Remove empty key paths left behind by a deletion.
    fn prune(&mut self, repo: &RepoIdentity) {
        let Some(remote) = self.remotes.get_mut(&repo.remote_url) else {
            return;
        };
        if remote
            .repos
            .get(&repo.repo_path)
            .is_some_and(RepoComponents::is_empty)
        {
            remote.repos.shift_remove(&repo.repo_path);
        }
        if remote.repos.is_empty() {
            self.remotes.shift_remove(&repo.remote_url);
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
