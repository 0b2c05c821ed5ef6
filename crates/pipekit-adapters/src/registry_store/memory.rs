//! In-memory registry store for testing.

use std::sync::{Arc, RwLock};

use pipekit_core::{
    application::ports::RegistryStore,
    domain::Registry,
    error::{PipekitError, PipekitResult},
};

/// Thread-safe in-memory registry store.
#[derive(Clone, Default)]
pub struct InMemoryRegistryStore {
    inner: Arc<RwLock<Registry>>,
}

impl InMemoryRegistryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a registry.
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Copy of the current registry (testing helper).
    pub fn snapshot(&self) -> Registry {
        self.inner.read().unwrap().clone()
    }
}

impl RegistryStore for InMemoryRegistryStore {
    fn load(&self) -> PipekitResult<Registry> {
        let inner = self.inner.read().map_err(|_| PipekitError::Internal {
            message: "registry store lock poisoned".into(),
        })?;
        Ok(inner.clone())
    }

    fn save(&self, registry: &Registry) -> PipekitResult<()> {
        let mut inner = self.inner.write().map_err(|_| PipekitError::Internal {
            message: "registry store lock poisoned".into(),
        })?;
        *inner = registry.clone();
        Ok(())
    }
}
