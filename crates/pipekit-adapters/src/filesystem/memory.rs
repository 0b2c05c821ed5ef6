//! In-memory filesystem adapter for testing.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use pipekit_core::{application::ports::ComponentFilesystem, error::PipekitResult};

/// In-memory component tree for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryComponentFilesystem {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    files: BTreeSet<PathBuf>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryComponentFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating all ancestor directories (testing helper).
    pub fn add_file(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut inner = self.inner.write().unwrap();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if current != path {
                inner.directories.insert(current.clone());
            }
        }
        inner.files.insert(path);
    }

    /// List all files (testing helper).
    pub fn files(&self) -> Vec<PathBuf> {
        self.inner.read().unwrap().files.iter().cloned().collect()
    }
}

impl ComponentFilesystem for MemoryComponentFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains(path) || inner.directories.contains(path)
    }

    fn delete_tree(&self, path: &Path) -> PipekitResult<bool> {
        let mut inner = self.inner.write().unwrap();
        let had_any = inner.directories.contains(path)
            || inner.files.iter().any(|p| p.starts_with(path));
        inner.files.retain(|p| !p.starts_with(path));
        inner.directories.retain(|p| !p.starts_with(path));
        Ok(had_any)
    }

    fn file_bearing_dirs(&self, root: &Path) -> PipekitResult<Vec<PathBuf>> {
        let inner = self.inner.read().unwrap();
        let mut dirs = BTreeSet::new();
        for file in &inner.files {
            if let Some(parent) = file.parent() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_creates_ancestors() {
        let fs = MemoryComponentFilesystem::new();
        fs.add_file("/p/modules/ns/fastqc/main.config");
        assert!(fs.exists(Path::new("/p/modules/ns/fastqc")));
        assert!(fs.exists(Path::new("/p/modules/ns/fastqc/main.config")));
        assert!(!fs.exists(Path::new("/p/modules/ns/other")));
    }

    #[test]
    fn delete_tree_removes_subtree_and_reports_absence() {
        let fs = MemoryComponentFilesystem::new();
        fs.add_file("/p/modules/ns/fastqc/main.config");
        assert!(fs.delete_tree(Path::new("/p/modules/ns/fastqc")).unwrap());
        assert!(!fs.delete_tree(Path::new("/p/modules/ns/fastqc")).unwrap());
        assert!(!fs.exists(Path::new("/p/modules/ns/fastqc")));
    }

    #[test]
    fn file_bearing_dirs_relative_to_root() {
        let fs = MemoryComponentFilesystem::new();
        fs.add_file("/p/modules/ns/samtools/sort/main.config");
        fs.add_file("/p/modules/ns/fastqc/main.config");
        let dirs = fs.file_bearing_dirs(Path::new("/p/modules/ns")).unwrap();
        assert_eq!(dirs, vec![PathBuf::from("fastqc"), PathBuf::from("samtools/sort")]);
    }
}
