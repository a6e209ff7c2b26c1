//! Tree Service - load and validate tree descriptions.
//!
//! Resolves the description format, reads the file through the filesystem
//! port, and hands the text to the matching parser.
//! Separated from ScaffoldService for single responsibility.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TreeParser},
    },
    domain::{ConfigFormat, DirectoryTree, DomainValidator as validator},
    error::{DirforgeError, DirforgeResult},
};

/// Service for loading tree descriptions.
pub struct TreeService {
    filesystem: Box<dyn Filesystem>,
    parsers: Vec<Box<dyn TreeParser>>,
}

impl TreeService {
    /// Create a new tree service.
    pub fn new(filesystem: Box<dyn Filesystem>, parsers: Vec<Box<dyn TreeParser>>) -> Self {
        Self {
            filesystem,
            parsers,
        }
    }

    /// Load, parse, and validate the tree description at `path`.
    ///
    /// `format` overrides detection by file extension.
    #[instrument(skip_all, fields(path = %path.display(), ?format))]
    pub fn load(&self, path: &Path, format: Option<ConfigFormat>) -> DirforgeResult<DirectoryTree> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::ConfigNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        if self.filesystem.is_dir(path) {
            return Err(ApplicationError::ConfigUnreadable {
                path: path.to_path_buf(),
                reason: "path is a directory".into(),
            }
            .into());
        }

        let source = self.filesystem.read_to_string(path).map_err(|e| {
            DirforgeError::from(ApplicationError::ConfigUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        })?;

        let format = format.unwrap_or_else(|| ConfigFormat::from_path(path));
        debug!(%format, bytes = source.len(), "Tree description read");

        self.parse(&source, format)
    }

    /// Parse and validate an in-memory tree description.
    pub fn parse(&self, source: &str, format: ConfigFormat) -> DirforgeResult<DirectoryTree> {
        let parser = self
            .parsers
            .iter()
            .find(|p| p.format() == format)
            .ok_or_else(|| ApplicationError::ParserNotConfigured {
                format: format.to_string(),
                available: self
                    .formats()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        let tree = parser.parse(source)?;
        validator::validate_tree(&tree)?;

        debug!(nodes = tree.node_count(), "Tree description parsed");
        Ok(tree)
    }

    /// Formats that have a registered parser.
    pub fn formats(&self) -> Vec<ConfigFormat> {
        self.parsers.iter().map(|p| p.format()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockTreeParser};
    use crate::domain::{DomainError, TreeNode};

    fn yaml_parser(tree: DirectoryTree) -> Box<dyn TreeParser> {
        let mut parser = MockTreeParser::new();
        parser.expect_format().return_const(ConfigFormat::Yaml);
        parser
            .expect_parse()
            .returning(move |_| Ok(tree.clone()));
        Box::new(parser)
    }

    fn readable_file(content: &'static str) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_is_dir().return_const(false);
        fs.expect_read_to_string()
            .returning(move |_| Ok(content.to_string()));
        fs
    }

    #[test]
    fn missing_file_is_not_found() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        let service = TreeService::new(Box::new(fs), vec![]);

        let err = service.load(Path::new("nope.yaml"), None).unwrap_err();
        assert!(matches!(
            err,
            DirforgeError::Application(ApplicationError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn directory_is_unreadable() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_is_dir().return_const(true);
        let service = TreeService::new(Box::new(fs), vec![]);

        let err = service.load(Path::new("conf"), None).unwrap_err();
        assert!(matches!(
            err,
            DirforgeError::Application(ApplicationError::ConfigUnreadable { .. })
        ));
    }

    #[test]
    fn format_detected_from_extension() {
        let tree = DirectoryTree::new().with_root(TreeNode::new("app"));
        let service = TreeService::new(
            Box::new(readable_file("app:")),
            vec![yaml_parser(tree.clone())],
        );

        assert_eq!(service.load(Path::new("layout.yml"), None).unwrap(), tree);
    }

    #[test]
    fn unknown_format_has_no_parser() {
        let tree = DirectoryTree::new().with_root(TreeNode::new("app"));
        let service = TreeService::new(Box::new(readable_file("app")), vec![yaml_parser(tree)]);

        let err = service.load(Path::new("layout.txt"), None).unwrap_err();
        assert!(matches!(
            &err,
            DirforgeError::Application(ApplicationError::ParserNotConfigured { available, .. })
                if available == "yaml"
        ));
        assert!(err.suggestions().iter().any(|s| s == "Available formats: yaml"));
    }

    #[test]
    fn override_beats_extension() {
        let tree = DirectoryTree::new().with_root(TreeNode::new("app"));
        let service = TreeService::new(
            Box::new(readable_file("app:")),
            vec![yaml_parser(tree.clone())],
        );

        let loaded = service
            .load(Path::new("layout.txt"), Some(ConfigFormat::Yaml))
            .unwrap();
        assert_eq!(loaded, tree);
    }

    #[test]
    fn parsed_tree_is_validated() {
        let service = TreeService::new(
            Box::new(readable_file("")),
            vec![yaml_parser(DirectoryTree::new())],
        );

        let err = service.load(Path::new("empty.yaml"), None).unwrap_err();
        assert!(matches!(err, DirforgeError::Domain(DomainError::EmptyTree)));
    }
}
