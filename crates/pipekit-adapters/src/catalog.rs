//! Registry-backed component catalog.
//!
//! Lists the names an interactive caller may pick from. For removal that
//! is exactly the set of installed components, so the catalog reads the
//! registry through the same store the engine uses.

use pipekit_core::{
    application::ports::{ComponentCatalog, RegistryStore},
    domain::{ComponentKind, RepoIdentity},
    error::PipekitResult,
};

/// Catalog of currently installed component names.
pub struct InstalledComponentCatalog {
    store: Box<dyn RegistryStore>,
    repo: RepoIdentity,
}

impl InstalledComponentCatalog {
    pub fn new(store: Box<dyn RegistryStore>, repo: RepoIdentity) -> Self {
        Self { store, repo }
    }
}

impl ComponentCatalog for InstalledComponentCatalog {
    fn installable_names(&self, kind: ComponentKind) -> PipekitResult<Vec<String>> {
        Ok(self.store.load()?.component_names(&self.repo, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry_store::InMemoryRegistryStore;
    use pipekit_core::domain::{ComponentRecord, ParentLink, Registry};

    #[test]
    fn lists_names_of_the_requested_kind_only() {
        let repo = RepoIdentity::new("https://example.com/c.git", "ns");
        let mut registry = Registry::new();
        let mut record = ComponentRecord::new("main", "abc");
        record.add_parent(ParentLink::Direct);
        registry.upsert(&repo, ComponentKind::Module, "fastqc", record.clone());
        registry.upsert(&repo, ComponentKind::Subworkflow, "align", record);

        let store = Box::new(InMemoryRegistryStore::with_registry(registry));
        let catalog = InstalledComponentCatalog::new(store, repo);

        assert_eq!(catalog.installable_names(ComponentKind::Module).unwrap(), vec!["fastqc"]);
        assert_eq!(
            catalog.installable_names(ComponentKind::Subworkflow).unwrap(),
            vec!["align"]
        );
    }
}
