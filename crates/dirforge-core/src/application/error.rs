//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not tree
//! validation. Validation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The tree description file does not exist.
    #[error("Tree description not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// The tree description exists but could not be read.
    #[error("Cannot read tree description {path}: {reason}")]
    ConfigUnreadable { path: PathBuf, reason: String },

    /// The base directory does not exist.
    #[error("Base directory does not exist: {path}")]
    BaseDirectoryMissing { path: PathBuf },

    /// The base directory path points at something other than a directory.
    #[error("Base directory is not a directory: {path}")]
    BaseDirectoryNotADirectory { path: PathBuf },

    /// The base directory cannot be written to.
    #[error("Base directory is not writable: {path}")]
    BaseDirectoryNotWritable { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// No parser registered for the requested format.
    #[error("No parser configured for format '{format}'")]
    ParserNotConfigured { format: String, available: String },

    /// Shared adapter state was poisoned by a panicking thread.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigNotFound { path } => vec![
                format!("No file at: {}", path.display()),
                "Check the path to the tree description".into(),
            ],
            Self::ConfigUnreadable { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the path is a regular file you can read".into(),
            ],
            Self::BaseDirectoryMissing { path } => vec![
                format!("Create it first: mkdir -p {}", path.display()),
                "Or pass an existing directory as the second argument".into(),
            ],
            Self::BaseDirectoryNotADirectory { path } => vec![
                format!("'{}' is a file", path.display()),
                "Pass a directory as the second argument".into(),
            ],
            Self::BaseDirectoryNotWritable { path } => vec![
                format!("Check write permissions on {}", path.display()),
                "Use --dry-run to preview without writing".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "A file with the same name may be in the way".into(),
            ],
            Self::ParserNotConfigured { format, available } => vec![
                format!("Format '{}' has no parser in this build", format),
                format!("Available formats: {}", available),
                "Use --format to select another format".into(),
            ],
            Self::LockPoisoned => vec!["Retry the operation".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigNotFound { .. } | Self::BaseDirectoryMissing { .. } => {
                ErrorCategory::NotFound
            }
            Self::ConfigUnreadable { .. }
            | Self::BaseDirectoryNotADirectory { .. }
            | Self::BaseDirectoryNotWritable { .. } => ErrorCategory::Validation,
            Self::ParserNotConfigured { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
