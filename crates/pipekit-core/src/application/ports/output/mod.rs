//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `pipekit-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{ComponentKind, Registry};
use crate::error::PipekitResult;

/// Port for registry persistence.
///
/// Implemented by:
/// - `pipekit_adapters::registry_store::JsonRegistryStore` (production)
/// - `pipekit_adapters::registry_store::InMemoryRegistryStore` (testing)
///
/// ## Design Notes
///
/// - The whole registry is read into memory, mutated, and written back:
///   load-mutate-save within one operation, no partial updates.
/// - A save must be atomic (write-to-temp-then-rename) so a crash never
///   leaves a half-written registry behind.
/// - A structurally invalid persisted registry must fail `load` — no
///   silent recovery.
#[cfg_attr(test, mockall::automock)]
pub trait RegistryStore: Send + Sync {
    /// Load the persisted registry. A missing file is an empty registry.
    fn load(&self) -> PipekitResult<Registry>;

    /// Persist the registry, replacing the previous file atomically.
    fn save(&self, registry: &Registry) -> PipekitResult<()>;
}

/// Port for component-tree filesystem access.
///
/// Implemented by:
/// - `pipekit_adapters::filesystem::LocalComponentFilesystem` (production)
/// - `pipekit_adapters::filesystem::MemoryComponentFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait ComponentFilesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Delete a directory tree. Idempotent: an absent path is not an
    /// error and returns `false`; `true` means something was deleted.
    fn delete_tree(&self, path: &Path) -> PipekitResult<bool>;

    /// Paths (relative to `root`) of every directory under `root` that
    /// directly contains at least one file. A missing root yields an
    /// empty listing. Used by the reconciliation audit.
    fn file_bearing_dirs(&self, root: &Path) -> PipekitResult<Vec<PathBuf>>;
}

/// Port for listing component names a caller may select from.
///
/// Consumed by interactive selection in the CLI layer, never by the
/// removal engine itself.
pub trait ComponentCatalog: Send + Sync {
    fn installable_names(&self, kind: ComponentKind) -> PipekitResult<Vec<String>>;
}
