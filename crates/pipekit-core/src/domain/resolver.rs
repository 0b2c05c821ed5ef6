//! Transitive dependent resolution over the registry's parent links.
//!
//! The registry stores the dependency graph inverted: each record lists the
//! parents that justify it. Resolving the dependents of a subworkflow is
//! therefore a scan for records whose `installed_by` names it, recursing
//! through nested subworkflows.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::component::{ComponentKind, RepoIdentity};
use super::registry::Registry;

/// Compute every component the given one caused to be installed.
///
/// A module is a leaf: the result is just the module itself. For a
/// subworkflow the result is its transitive dependents (the subworkflow
/// itself is *not* included — the caller seeds the candidate set with it).
///
/// Install graphs are expected to be acyclic, but a hand-edited registry
/// must not hang the traversal: a visited set keyed by `(kind, name)`
/// guarantees termination, and a child referenced by several subworkflows
/// appears once regardless of visitation order.
pub fn resolve_dependents(
    registry: &Registry,
    repo: &RepoIdentity,
    kind: ComponentKind,
    name: &str,
) -> IndexMap<String, ComponentKind> {
    let mut dependents = IndexMap::new();
    if kind == ComponentKind::Module {
        dependents.insert(name.to_owned(), ComponentKind::Module);
        return dependents;
    }

    let mut visited: HashSet<(ComponentKind, String)> = HashSet::new();
    visited.insert((kind, name.to_owned()));
    collect(registry, repo, name, &mut visited, &mut dependents);
    dependents
}

fn collect(
    registry: &Registry,
    repo: &RepoIdentity,
    parent: &str,
    visited: &mut HashSet<(ComponentKind, String)>,
    out: &mut IndexMap<String, ComponentKind>,
) {
    // Children discovered in this pass; recursion happens after the scan so
    // the registry iterator is not held across nested walks.
    let mut nested: Vec<String> = Vec::new();

    for (child_kind, child_name, record) in registry.entries(repo) {
        if !record.installed_by.iter().any(|p| p.is_subworkflow(parent)) {
            continue;
        }
        if !visited.insert((child_kind, child_name.clone())) {
            continue;
        }
        out.insert(child_name.clone(), child_kind);
        if child_kind == ComponentKind::Subworkflow {
            nested.push(child_name.clone());
        }
    }

    for child in nested {
        collect(registry, repo, &child, visited, out);
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
