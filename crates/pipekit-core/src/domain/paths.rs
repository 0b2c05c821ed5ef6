//! Pure path resolution from component identifiers to on-disk locations.
//!
//! Component trees live under `<project>/<section>/<repo_path>/<name>`,
//! e.g. `./modules/pipekit/bwa_mem` or `./subworkflows/pipekit/align`.
//! Names may contain `/` for namespaced components (`samtools/sort`).

use std::path::{Path, PathBuf};

use super::component::ComponentKind;

/// Root directory holding all components of one kind from one repo path.
pub fn components_root(project_dir: &Path, kind: ComponentKind, repo_path: &str) -> PathBuf {
    project_dir.join(kind.section()).join(repo_path)
}

/// Expected directory of a single component.
pub fn component_path(
    project_dir: &Path,
    kind: ComponentKind,
    repo_path: &str,
    name: &str,
) -> PathBuf {
    components_root(project_dir, kind, repo_path).join(name)
}
