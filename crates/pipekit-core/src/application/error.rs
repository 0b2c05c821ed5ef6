//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the I/O edges,
//! not business logic. Business logic errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving the registry and filesystem ports.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The persisted registry failed to parse or validate. Fatal for the
    /// invocation; never silently recovered — wrong dependency bookkeeping
    /// is worse than stopping.
    #[error("corrupt component registry at {path}: {reason}")]
    CorruptRegistry { path: PathBuf, reason: String },

    /// Writing the registry back failed.
    #[error("failed to save component registry to {path}: {reason}")]
    RegistrySave { path: PathBuf, reason: String },

    /// A filesystem operation on a component tree failed.
    #[error("filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// The name catalog could not produce its listing.
    #[error("component catalog error: {reason}")]
    Catalog { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CorruptRegistry { path, .. } => vec![
                format!("The registry file is not valid: {}", path.display()),
                "Inspect the file by hand or restore it from version control".into(),
                "No changes were made".into(),
            ],
            Self::RegistrySave { path, .. } => vec![
                format!("Could not write: {}", path.display()),
                "Check write permissions and available disk space".into(),
                "The previous registry file is untouched".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::Catalog { .. } => vec!["Could not list component names".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CorruptRegistry { .. } => ErrorCategory::Configuration,
            Self::RegistrySave { .. } | Self::Filesystem { .. } => ErrorCategory::Internal,
            Self::Catalog { .. } => ErrorCategory::Internal,
        }
    }
}
