// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for dirforge.
//!
//! This module contains pure tree logic with ZERO I/O.
//! Reading descriptions and touching the filesystem are handled via ports
//! (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror (+ serde for reports)
//! - **Immutable values**: `Mode`, `Owner`, `ConfigFormat` are parsed once
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    layout::{DirectoryEntry, FileEntry, Layout, LayoutEntry},
    tree::{DirectoryTree, TreeNode},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{ConfigFormat, Mode, Owner};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn mode_parses_octal_strings() {
        assert_eq!(Mode::from_str("755").unwrap().bits(), 0o755);
        assert_eq!(Mode::from_str("0750").unwrap().bits(), 0o750);
        assert_eq!(Mode::from_str("0o644").unwrap().bits(), 0o644);
        assert_eq!(Mode::from_str(" 1777 ").unwrap().bits(), 0o1777);
    }

    #[test]
    fn mode_rejects_garbage() {
        assert!(Mode::from_str("rwxr-xr-x").is_err());
        assert!(Mode::from_str("789").is_err());
        assert!(Mode::from_str("75").is_err());
        assert!(Mode::from_str("07555").is_err());
        assert!(Mode::from_str("u+x").is_err());
        assert!(Mode::new(0o10000).is_err());
    }

    #[test]
    fn mode_display_is_octal() {
        assert_eq!(Mode::new(0o755).unwrap().to_string(), "755");
        assert_eq!(Mode::new(0o700).unwrap().to_string(), "700");
        assert_eq!(Mode::new(0o2775).unwrap().to_string(), "2775");
        assert_eq!(Mode::new(0o44).unwrap().to_string(), "044");
    }

    #[test]
    fn owner_parses_all_forms() {
        let both = Owner::from_str("www-data:staff").unwrap();
        assert_eq!(both.user(), Some("www-data"));
        assert_eq!(both.group(), Some("staff"));

        let user = Owner::from_str("root").unwrap();
        assert_eq!(user.user(), Some("root"));
        assert_eq!(user.group(), None);

        let group = Owner::from_str(":docker").unwrap();
        assert_eq!(group.user(), None);
        assert_eq!(group.group(), Some("docker"));
        assert_eq!(group.to_string(), ":docker");
    }

    #[test]
    fn owner_rejects_malformed() {
        assert!(Owner::from_str("").is_err());
        assert!(Owner::from_str(":").is_err());
        assert!(Owner::from_str("a:b:c").is_err());
        assert!(Owner::from_str("john doe").is_err());
    }

    #[test]
    fn owner_rejects_trailing_colon() {
        assert!(matches!(
            Owner::from_str("deploy:"),
            Err(DomainError::InvalidOwner { .. })
        ));
    }

    #[test]
    fn owner_numeric_ids() {
        assert_eq!(
            Owner::from_str("1000:100").unwrap().numeric_ids(),
            Some((Some(1000), Some(100)))
        );
        assert_eq!(
            Owner::from_str(":50").unwrap().numeric_ids(),
            Some((None, Some(50)))
        );
        assert_eq!(Owner::from_str("root:0").unwrap().numeric_ids(), None);
    }

    #[test]
    fn config_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("tree.txt")), ConfigFormat::Indent);
        assert_eq!(ConfigFormat::from_path(Path::new("layout")), ConfigFormat::Indent);
    }

    // ========================================================================
    // Tree Tests
    // ========================================================================

    fn sample_tree() -> DirectoryTree {
        DirectoryTree::new().with_root(
            TreeNode::new("project")
                .with_permissions(Mode::new(0o755).unwrap())
                .with_default_file("README.md")
                .with_child(
                    TreeNode::new("src")
                        .with_default_file("main.rs")
                        .with_child(TreeNode::new("bin")),
                )
                .with_child(TreeNode::new("docs")),
        )
    }

    #[test]
    fn tree_validates() {
        assert!(sample_tree().validate().is_ok());
        assert_eq!(sample_tree().node_count(), 4);
    }

    #[test]
    fn empty_tree_is_rejected() {
        assert_eq!(DirectoryTree::new().validate(), Err(DomainError::EmptyTree));
    }

    #[test]
    fn duplicate_siblings_are_rejected() {
        let tree = DirectoryTree::new().with_root(
            TreeNode::new("a")
                .with_child(TreeNode::new("b"))
                .with_child(TreeNode::new("b")),
        );
        assert!(matches!(
            tree.validate(),
            Err(DomainError::DuplicatePath { path }) if path == "a/b"
        ));
    }

    #[test]
    fn file_clashing_with_directory_is_rejected() {
        let tree = DirectoryTree::new().with_root(
            TreeNode::new("a")
                .with_default_file("b")
                .with_child(TreeNode::new("b")),
        );
        assert!(matches!(tree.validate(), Err(DomainError::DuplicatePath { .. })));
    }

    #[test]
    fn duplicate_roots_are_rejected() {
        let tree = DirectoryTree::new()
            .with_root(TreeNode::new("x"))
            .with_root(TreeNode::new("x"));
        assert!(tree.validate().is_err());
    }

    #[test]
    fn names_cannot_escape() {
        for bad in ["", "..", ".", "a/b", "a\\b"] {
            let tree = DirectoryTree::new().with_root(TreeNode::new(bad));
            assert!(
                matches!(tree.validate(), Err(DomainError::InvalidName { .. })),
                "{bad:?} should be rejected"
            );
        }
        let tree = DirectoryTree::new().with_root(TreeNode::new("ok").with_default_file("../x"));
        assert!(tree.validate().is_err());
    }

    // ========================================================================
    // Layout Tests
    // ========================================================================

    #[test]
    fn layout_is_pre_order_with_files_first() {
        let layout = sample_tree().layout();
        let paths: Vec<PathBuf> = layout.entries().iter().map(|e| e.path().to_path_buf()).collect();

        assert_eq!(
            paths,
            vec![
                PathBuf::from("project"),
                PathBuf::from("project/README.md"),
                PathBuf::from("project/src"),
                PathBuf::from("project/src/main.rs"),
                PathBuf::from("project/src/bin"),
                PathBuf::from("project/docs"),
            ]
        );
    }

    #[test]
    fn layout_depth_matches_path_depth() {
        let layout = sample_tree().layout();
        for dir in layout.directories() {
            assert_eq!(dir.path.components().count(), dir.depth + 1);
        }
        assert_eq!(layout.directories().count(), sample_tree().node_count());
        assert_eq!(layout.files().count(), 2);
    }

    #[test]
    fn layout_carries_metadata() {
        let layout = sample_tree().layout();
        let root = layout.directories().next().unwrap();
        assert_eq!(root.permissions, Some(Mode::new(0o755).unwrap()));
        assert!(root.has_metadata());
        assert!(!layout.directories().last().unwrap().has_metadata());
    }

    #[test]
    fn layout_rejects_duplicates() {
        let mut layout = Layout::new();
        layout.add_directory("a", 0, None, None);
        layout.add_file("a");
        assert!(DomainValidator::validate_layout(&layout).is_err());
    }

    #[test]
    fn layout_rejects_absolute() {
        let mut layout = Layout::new();
        layout.add_directory("/etc", 0, None, None);
        assert!(matches!(
            layout.validate(),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }
}
