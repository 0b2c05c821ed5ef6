//! Core domain layer for pipekit.
//!
//! Pure registry logic with no I/O: component identity, the typed registry
//! document, parent-link reference counting, dependent resolution, and
//! path derivation. All filesystem and persistence concerns go through the
//! ports defined in the application layer.

pub mod component;
pub mod error;
pub mod paths;
pub mod registry;
pub mod resolver;

// Re-exports for convenience
pub use component::{
    ComponentKind, ComponentRecord, DIRECT_MARKER, DirectoryState, ParentLink, RepoIdentity,
};
pub use error::{DomainError, ErrorCategory};
pub use paths::{component_path, components_root};
pub use registry::{DeleteOutcome, Registry, RepoComponents};
pub use resolver::resolve_dependents;
