//! pipekit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the pipekit
//! component registry tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          pipekit-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (RemovalService, AuditService)       │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: RegistryStore, Filesystem, …)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     pipekit-adapters (Infrastructure)   │
//! │  (JsonRegistryStore, LocalFilesystem)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Registry, ComponentRecord, Resolver)  │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! # use pipekit_core::application::ports::{ComponentFilesystem, RegistryStore};
//! # fn wire(store: Box<dyn RegistryStore>, filesystem: Box<dyn ComponentFilesystem>) {
//! use pipekit_core::{
//!     application::RemovalService,
//!     domain::{ComponentKind, RepoIdentity},
//! };
//!
//! // 1. Identify the component source (from project configuration)
//! let repo = RepoIdentity::new("https://github.com/pipekit/components.git", "pipekit");
//!
//! // 2. Use the application service (with injected adapters)
//! let service = RemovalService::new(store, filesystem, repo, "./my-pipeline");
//! let report = service.remove(ComponentKind::Subworkflow, "align_reads").unwrap();
//! println!("removed: {:?}", report.removed);
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AuditReport, AuditService, RemovalReport, RemovalService,
        ports::{ComponentCatalog, ComponentFilesystem, RegistryStore},
    };
    pub use crate::domain::{
        ComponentKind, ComponentRecord, DeleteOutcome, DirectoryState, ParentLink, Registry,
        RepoIdentity, component_path, components_root, resolve_dependents,
    };
    pub use crate::error::{PipekitError, PipekitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
