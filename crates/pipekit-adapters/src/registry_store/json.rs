//! JSON file registry store.
//!
//! Persists the registry as pretty-printed JSON at
//! `<project>/components.json`. Saves go through a temp file in the same
//! directory followed by an atomic rename, so a crash mid-write leaves
//! the previous file intact. Loads fail fast on structurally invalid
//! content — wrong dependency bookkeeping is worse than stopping.

use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use pipekit_core::{
    application::{ApplicationError, ports::RegistryStore},
    domain::Registry,
    error::PipekitResult,
};

/// File name of the persisted registry inside a project directory.
pub const REGISTRY_FILE: &str = "components.json";

/// Production registry store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonRegistryStore {
    path: PathBuf,
}

impl JsonRegistryStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional location inside a project directory.
    pub fn for_project(project_dir: &Path) -> Self {
        Self::new(project_dir.join(REGISTRY_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_error(&self, e: impl ToString) -> pipekit_core::error::PipekitError {
        ApplicationError::RegistrySave {
            path: self.path.clone(),
            reason: e.to_string(),
        }
        .into()
    }
}

impl RegistryStore for JsonRegistryStore {
    fn load(&self) -> PipekitResult<Registry> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // No registry yet: the project simply has no components.
                debug!(path = %self.path.display(), "No registry file, starting empty");
                return Ok(Registry::new());
            }
            Err(e) => {
                return Err(ApplicationError::Filesystem {
                    path: self.path.clone(),
                    reason: format!("Failed to read registry: {e}"),
                }
                .into());
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            ApplicationError::CorruptRegistry {
                path: self.path.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn save(&self, registry: &Registry) -> PipekitResult<()> {
        let json = serde_json::to_string_pretty(registry).map_err(|e| self.save_error(e))?;

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        // Same-directory temp file: the final rename stays on one
        // filesystem and is atomic.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.save_error(e))?;
        tmp.write_all(json.as_bytes()).map_err(|e| self.save_error(e))?;
        tmp.write_all(b"\n").map_err(|e| self.save_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.save_error(e))?;

        debug!(path = %self.path.display(), "Registry saved");
        Ok(())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pipekit_core::domain::{ComponentKind, ComponentRecord, ParentLink, RepoIdentity};
    use pipekit_core::error::PipekitError;

    fn repo() -> RepoIdentity {
        RepoIdentity::new("https://github.com/pipekit/components.git", "pipekit")
    }

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        let mut record = ComponentRecord::new("main", "abc123");
        record.add_parent(ParentLink::Direct);
        registry.upsert(&repo(), ComponentKind::Module, "fastqc", record);
        registry
    }

    #[test]
    fn missing_file_loads_as_empty_registry() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonRegistryStore::for_project(tmp.path());
        let registry = store.load().unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonRegistryStore::for_project(tmp.path());
        store.save(&sample_registry()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, sample_registry());
    }

    #[test]
    fn corrupt_file_fails_fast_and_is_left_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(REGISTRY_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonRegistryStore::for_project(tmp.path());
        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            PipekitError::Application(ApplicationError::CorruptRegistry { .. })
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn structurally_invalid_document_is_corrupt() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(REGISTRY_FILE);
        // installed_by must be an array of strings
        std::fs::write(
            &path,
            r#"{"r": {"ns": {"modules": {"x": {"branch": "b", "git_sha": "s", "installed_by": 42}}, "subworkflows": {}}}}"#,
        )
        .unwrap();

        let store = JsonRegistryStore::for_project(tmp.path());
        assert!(matches!(
            store.load().unwrap_err(),
            PipekitError::Application(ApplicationError::CorruptRegistry { .. })
        ));
    }

    #[test]
    fn foreign_keys_round_trip_through_save() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(REGISTRY_FILE);
        std::fs::write(
            &path,
            r#"{
              "https://github.com/pipekit/components.git": {
                "pipekit": {
                  "modules": {
                    "fastqc": {"branch": "main", "git_sha": "abc", "installed_by": ["direct"], "patch": "fix.diff"}
                  },
                  "subworkflows": {},
                  "functions": {}
                }
              }
            }"#,
        )
        .unwrap();

        let store = JsonRegistryStore::for_project(tmp.path());
        let registry = store.load().unwrap();
        store.save(&registry).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let repo_section = &raw["https://github.com/pipekit/components.git"]["pipekit"];
        assert_eq!(repo_section["modules"]["fastqc"]["patch"], "fix.diff");
        assert!(repo_section["functions"].is_object());
    }

    #[test]
    fn save_replaces_without_leaving_temp_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonRegistryStore::for_project(tmp.path());
        store.save(&sample_registry()).unwrap();
        store.save(&Registry::new()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(REGISTRY_FILE)]);
        assert!(store.load().unwrap().is_empty());
    }
}
