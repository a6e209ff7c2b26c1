// ============================================================================
// domain/error.rs - TREE VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports can keep copies)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Syntax Errors (tree description could not be read)
    // ========================================================================
    #[error("Invalid syntax at line {line}: {reason}")]
    SyntaxAt { line: usize, reason: String },

    #[error("Invalid syntax: {0}")]
    Syntax(String),

    // ========================================================================
    // Structural Errors
    // ========================================================================
    #[error("The tree description declares no directories")]
    EmptyTree,

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Duplicate path in tree: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Metadata Errors
    // ========================================================================
    #[error("Invalid permissions '{value}': {reason}")]
    InvalidPermissions { value: String, reason: String },

    #[error("Invalid owner '{value}': {reason}")]
    InvalidOwner { value: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SyntaxAt { line, .. } => vec![
                format!("Check line {} of the tree description", line),
                "Indent children one level deeper than their parent".into(),
                "Use either spaces or tabs, not both".into(),
            ],
            Self::Syntax(_) => vec![
                "Check the tree description for structural mistakes".into(),
                "YAML nodes accept: permissions, owner, default_files, subdirs".into(),
            ],
            Self::EmptyTree => vec![
                "Declare at least one directory".into(),
                "Lines starting with '#' are treated as comments".into(),
            ],
            Self::InvalidName { name, .. } => vec![
                format!("Rename '{}'", name),
                "Names cannot be empty, '.', '..', or contain path separators".into(),
                "Nest directories instead of writing 'a/b'".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("'{}' is declared more than once", path),
                "Merge the duplicate entries into one node".into(),
            ],
            Self::InvalidPermissions { .. } => vec![
                "Permissions must be an octal mode such as 755 or 0640".into(),
                "Quote the value in YAML: permissions: \"0755\"".into(),
            ],
            Self::InvalidOwner { .. } => vec![
                "Owner must be 'user', 'user:group', or ':group'".into(),
                "Numeric ids are accepted: '1000:1000'".into(),
            ],
            Self::AbsolutePathNotAllowed { .. } => {
                vec!["Tree entries are always relative to the base directory".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
