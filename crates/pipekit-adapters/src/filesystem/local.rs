//! Local filesystem adapter using std::fs and walkdir.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use pipekit_core::{application::ports::ComponentFilesystem, error::PipekitResult};

/// Production filesystem implementation.
#[derive(Debug, Clone, Copy)]
pub struct LocalComponentFilesystem;

impl LocalComponentFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalComponentFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentFilesystem for LocalComponentFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn delete_tree(&self, path: &Path) -> PipekitResult<bool> {
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))?;
        Ok(true)
    }

    fn file_bearing_dirs(&self, root: &Path) -> PipekitResult<Vec<PathBuf>> {
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        // BTreeSet: one entry per directory, in deterministic order.
        let mut dirs = BTreeSet::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| {
                let io = io::Error::other(e.to_string());
                map_io_error(root, io, "walk component tree")
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(parent) = entry.path().parent() {
                if let Ok(rel) = parent.strip_prefix(root) {
                    if !rel.as_os_str().is_empty() {
                        dirs.insert(rel.to_path_buf());
                    }
                }
            }
        }
        Ok(dirs.into_iter().collect())
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> pipekit_core::error::PipekitError {
    use pipekit_core::application::ApplicationError;

    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
