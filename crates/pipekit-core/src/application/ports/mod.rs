//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `pipekit-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `RegistryStore`: registry persistence
//!   - `ComponentFilesystem`: component-tree access
//!   - `ComponentCatalog`: installable-name listing
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ComponentCatalog, ComponentFilesystem, RegistryStore};

#[cfg(test)]
pub use output::{MockComponentFilesystem, MockRegistryStore};
