//! Declarative directory tree.
//!
//! A [`DirectoryTree`] is what a parser produces from a tree description. It
//! mirrors the nesting the user wrote; [`DirectoryTree::layout`] turns it into
//! the flat, ordered list of paths the scaffold service works through.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::layout::Layout,
    error::DomainError,
    value_objects::{Mode, Owner},
};

/// One named directory with optional metadata and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    name: String,
    permissions: Option<Mode>,
    owner: Option<Owner>,
    default_files: Vec<String>,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: None,
            owner: None,
            default_files: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_permissions(mut self, mode: Mode) -> Self {
        self.permissions = Some(mode);
        self
    }

    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_default_file(mut self, name: impl Into<String>) -> Self {
        self.default_files.push(name.into());
        self
    }

    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    pub fn set_permissions(&mut self, mode: Mode) {
        self.permissions = Some(mode);
    }

    pub fn set_owner(&mut self, owner: Owner) {
        self.owner = Some(owner);
    }

    pub fn add_default_file(&mut self, name: impl Into<String>) {
        self.default_files.push(name.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permissions(&self) -> Option<Mode> {
        self.permissions
    }

    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    pub fn default_files(&self) -> &[String] {
        &self.default_files
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Number of directories in this subtree, including this node.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    fn validate(&self, parent: &Path) -> Result<(), DomainError> {
        validate_name(&self.name)?;
        let path = parent.join(&self.name);

        let mut siblings = HashSet::new();
        let names = self
            .default_files
            .iter()
            .map(String::as_str)
            .chain(self.children.iter().map(TreeNode::name));
        for name in names {
            validate_name(name)?;
            if !siblings.insert(name) {
                return Err(DomainError::DuplicatePath {
                    path: path.join(name).display().to_string(),
                });
            }
        }

        self.children
            .iter()
            .try_for_each(|child| child.validate(&path))
    }

    fn flatten_into(&self, parent: &Path, depth: usize, layout: &mut Layout) {
        let path = parent.join(&self.name);
        layout.add_directory(&path, depth, self.permissions, self.owner.clone());

        for file in &self.default_files {
            layout.add_file(path.join(file));
        }
        for child in &self.children {
            child.flatten_into(&path, depth + 1, layout);
        }
    }
}

/// The whole declared hierarchy: an ordered list of root nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryTree {
    roots: Vec<TreeNode>,
}

impl DirectoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, node: TreeNode) -> Self {
        self.roots.push(node);
        self
    }

    pub fn add_root(&mut self, node: TreeNode) {
        self.roots.push(node);
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of directories declared across all roots.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(TreeNode::node_count).sum()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.roots.is_empty() {
            return Err(DomainError::EmptyTree);
        }

        let mut seen = HashSet::new();
        for root in &self.roots {
            if !seen.insert(root.name()) {
                return Err(DomainError::DuplicatePath {
                    path: root.name().to_string(),
                });
            }
            root.validate(Path::new(""))?;
        }

        Ok(())
    }

    /// Flatten into creation order (pre-order, files before child directories).
    pub fn layout(&self) -> Layout {
        let mut layout = Layout::new();
        let base = PathBuf::new();
        for root in &self.roots {
            root.flatten_into(&base, 0, &mut layout);
        }
        layout
    }
}

/// Names become single path components, so anything that would escape or
/// split the component is rejected.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("name cannot be '.' or '..'"));
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("name cannot contain path separators"));
    }
    if name.contains('\0') {
        return Err(invalid("name cannot contain NUL"));
    }
    Ok(())
}
