//! Domain-level errors: violations of what the registry knows to be true.

use thiserror::Error;

use super::component::ComponentKind;

/// Root domain error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Neither a registry entry nor on-disk files exist for the component.
    /// No mutation was performed.
    #[error("{kind} '{name}' is not installed")]
    NotInstalled { kind: ComponentKind, name: String },

    /// The registry has no entry under the given key, but the caller had
    /// reason to expect one (e.g. `info` on an unknown name).
    #[error("no registry entry for {kind} '{name}'")]
    EntryMissing { kind: ComponentKind, name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotInstalled { kind, name } => vec![
                format!("'{name}' has no registry entry and no files on disk"),
                format!("List installed {kind}s: pipekit {}s list", kind),
                "Check the spelling of the component name".into(),
            ],
            Self::EntryMissing { kind, .. } => vec![
                format!("List installed {kind}s: pipekit {}s list", kind),
                "If the files exist but the entry is gone, run: pipekit check".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotInstalled { .. } | Self::EntryMissing { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
