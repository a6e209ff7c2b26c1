use crate::domain::{
    entities::{DirectoryTree, Layout, tree},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_tree(tree: &DirectoryTree) -> Result<(), DomainError> {
        tree.validate()
    }

    pub fn validate_layout(layout: &Layout) -> Result<(), DomainError> {
        layout.validate()
    }

    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        tree::validate_name(name)
    }
}
