//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "remove a component and its unreferenced
//! dependents" or "audit the registry against the component tree".

pub mod audit_service;
pub mod removal_service;

pub use audit_service::{AuditReport, AuditService};
pub use removal_service::{RemovalReport, RemovalService};
