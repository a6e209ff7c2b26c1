//! Scaffold Service - main application orchestrator.
//!
//! This service materializes a validated tree under a base directory:
//! 1. Validate the base directory
//! 2. Flatten the tree into a layout
//! 3. Create missing directories and placeholder files
//! 4. Apply permissions and ownership, children before parents
//!
//! Existing directories and files are left in place, so running the same
//! tree twice changes nothing the second time.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::Filesystem,
        services::report::{ApplyOptions, ApplyReport, Outcome},
    },
    domain::{
        DirectoryEntry, DirectoryTree, DomainValidator as validator, FileEntry, Layout,
        LayoutEntry,
    },
    error::{DirforgeError, DirforgeResult},
};

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given filesystem adapter.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use dirforge_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(filesystem); // impl Filesystem
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Materialize `tree` under `base`.
    ///
    /// Validation failures and directory creation failures abort with an
    /// error. Placeholder file, permission, and ownership failures are
    /// recorded as [`Outcome::Warning`] and the run continues.
    #[instrument(
        skip_all,
        fields(
            base = %base.display(),
            dry_run = options.dry_run,
            nodes = tree.node_count()
        )
    )]
    pub fn apply(
        &self,
        tree: &DirectoryTree,
        base: &Path,
        options: &ApplyOptions,
    ) -> DirforgeResult<ApplyReport> {
        // 1. Validate base directory
        self.validate_base(base, options.dry_run)?;

        // 2. Validate tree and its flattened layout
        validator::validate_tree(tree).map_err(DirforgeError::Domain)?;
        let layout = tree.layout();
        validator::validate_layout(&layout).map_err(DirforgeError::Domain)?;

        info!(entries = layout.len(), "Applying layout");

        let mut report = ApplyReport::new(options.dry_run);

        // 3. Directories and files, top-down
        self.create_entries(&layout, base, options, &mut report)?;

        // 4. Metadata, bottom-up
        self.apply_metadata(&layout, base, options, &mut report);

        info!(
            created = report.directories_created(),
            existing = report.directories_existing(),
            files = report.files_created(),
            warnings = report.warning_count(),
            "Layout applied"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn validate_base(&self, base: &Path, dry_run: bool) -> DirforgeResult<()> {
        if !self.filesystem.exists(base) {
            return Err(ApplicationError::BaseDirectoryMissing {
                path: base.to_path_buf(),
            }
            .into());
        }

        if !self.filesystem.is_dir(base) {
            return Err(ApplicationError::BaseDirectoryNotADirectory {
                path: base.to_path_buf(),
            }
            .into());
        }

        if !dry_run && !self.filesystem.is_writable(base) {
            return Err(ApplicationError::BaseDirectoryNotWritable {
                path: base.to_path_buf(),
            }
            .into());
        }

        Ok(())
    }

    fn create_entries(
        &self,
        layout: &Layout,
        base: &Path,
        options: &ApplyOptions,
        report: &mut ApplyReport,
    ) -> DirforgeResult<()> {
        for entry in layout.entries() {
            match entry {
                LayoutEntry::Directory(dir) => {
                    self.create_directory(dir, base, options, report)?;
                }
                LayoutEntry::File(file) => self.create_file(file, base, options, report),
            }
        }
        Ok(())
    }

    fn create_directory(
        &self,
        dir: &DirectoryEntry,
        base: &Path,
        options: &ApplyOptions,
        report: &mut ApplyReport,
    ) -> DirforgeResult<()> {
        let path = base.join(&dir.path);

        if self.filesystem.is_dir(&path) {
            debug!(path = %path.display(), "Directory exists");
            report.record(Outcome::DirectoryExists { path });
            return Ok(());
        }

        if self.filesystem.exists(&path) {
            if !options.dry_run {
                return Err(ApplicationError::FilesystemError {
                    path,
                    reason: "a file occupies the directory path".into(),
                }
                .into());
            }
            warn!(path = %path.display(), "Directory path is a file");
            report.record(Outcome::Warning {
                path,
                message: "a file occupies the directory path; a real run stops here".into(),
            });
            return Ok(());
        }

        if !options.dry_run {
            self.filesystem.create_dir_all(&path)?;
        }

        debug!(path = %path.display(), "Directory created");
        report.record(Outcome::DirectoryCreated { path });
        Ok(())
    }

    fn create_file(
        &self,
        file: &FileEntry,
        base: &Path,
        options: &ApplyOptions,
        report: &mut ApplyReport,
    ) {
        let path = base.join(&file.path);

        if self.filesystem.is_dir(&path) {
            warn!(path = %path.display(), "Default file path is a directory");
            report.record(Outcome::Warning {
                path,
                message: "a directory occupies the default file path".into(),
            });
            return;
        }

        if self.filesystem.exists(&path) {
            report.record(Outcome::FileExists { path });
            return;
        }

        if options.dry_run {
            report.record(Outcome::FileCreated { path });
            return;
        }

        match self.filesystem.create_file(&path) {
            Ok(true) => report.record(Outcome::FileCreated { path }),
            Ok(false) => report.record(Outcome::FileExists { path }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to create default file");
                report.record(Outcome::Warning {
                    path,
                    message: format!("failed to create file: {e}"),
                });
            }
        }
    }

    /// Reverse pre-order visits every child before its parent, so a
    /// restrictive mode or foreign owner on a parent never blocks work on
    /// its children.
    fn apply_metadata(
        &self,
        layout: &Layout,
        base: &Path,
        options: &ApplyOptions,
        report: &mut ApplyReport,
    ) {
        for dir in layout.directories().rev().filter(|d| d.has_metadata()) {
            let path = base.join(&dir.path);

            if let Some(mode) = dir.permissions.filter(|_| !options.skip_permissions) {
                let result = if options.dry_run {
                    Ok(())
                } else {
                    self.filesystem.set_mode(&path, mode)
                };
                match result {
                    Ok(()) => report.record(Outcome::PermissionsApplied {
                        path: path.clone(),
                        mode,
                    }),
                    Err(e) => {
                        warn!(path = %path.display(), %mode, error = %e, "Failed to set permissions");
                        report.record(Outcome::Warning {
                            path: path.clone(),
                            message: format!("failed to set permissions {mode}: {e}"),
                        });
                    }
                }
            }

            if let Some(owner) = dir.owner.as_ref().filter(|_| !options.skip_ownership) {
                let result = if options.dry_run {
                    Ok(())
                } else {
                    self.filesystem.set_owner(&path, owner)
                };
                match result {
                    Ok(()) => report.record(Outcome::OwnerApplied {
                        path,
                        owner: owner.clone(),
                    }),
                    Err(e) => {
                        warn!(path = %path.display(), %owner, error = %e, "Failed to set owner");
                        report.record(Outcome::Warning {
                            path,
                            message: format!("failed to set owner {owner}: {e}"),
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mockall::predicate::eq;

    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{Mode, Owner, TreeNode};

    fn writable_base() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(PathBuf::from("/base")))
            .return_const(true);
        fs.expect_is_dir()
            .with(eq(PathBuf::from("/base")))
            .return_const(true);
        fs.expect_is_writable().return_const(true);
        fs
    }

    fn tree_with_metadata() -> DirectoryTree {
        DirectoryTree::new().with_root(
            TreeNode::new("srv")
                .with_permissions(Mode::new(0o750).unwrap())
                .with_owner("www:www".parse::<Owner>().unwrap())
                .with_child(TreeNode::new("logs")),
        )
    }

    #[test]
    fn missing_base_aborts() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        let service = ScaffoldService::new(Box::new(fs));

        let err = service
            .apply(&tree_with_metadata(), Path::new("/nope"), &ApplyOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DirforgeError::Application(ApplicationError::BaseDirectoryMissing { .. })
        ));
    }

    #[test]
    fn read_only_base_aborts() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_is_dir().return_const(true);
        fs.expect_is_writable().return_const(false);
        let service = ScaffoldService::new(Box::new(fs));

        let err = service
            .apply(&tree_with_metadata(), Path::new("/ro"), &ApplyOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            DirforgeError::Application(ApplicationError::BaseDirectoryNotWritable { .. })
        ));
    }

    #[test]
    fn metadata_failures_are_warnings() {
        let mut fs = writable_base();
        fs.expect_exists().return_const(false);
        fs.expect_is_dir().return_const(false);
        fs.expect_create_dir_all().times(2).returning(|_| Ok(()));
        fs.expect_set_mode().times(1).returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "Operation not permitted".into(),
            }
            .into())
        });
        fs.expect_set_owner().times(1).returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "invalid user".into(),
            }
            .into())
        });
        let service = ScaffoldService::new(Box::new(fs));

        let report = service
            .apply(&tree_with_metadata(), Path::new("/base"), &ApplyOptions::default())
            .unwrap();

        assert_eq!(report.directories_created(), 2);
        assert_eq!(report.warning_count(), 2);
        assert!(report.warnings().all(|w| w.path() == Path::new("/base/srv")));
    }

    #[test]
    fn directory_failure_aborts() {
        let mut fs = writable_base();
        fs.expect_exists().return_const(false);
        fs.expect_is_dir().return_const(false);
        fs.expect_create_dir_all().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "File exists".into(),
            }
            .into())
        });
        let service = ScaffoldService::new(Box::new(fs));

        let result = service.apply(&tree_with_metadata(), Path::new("/base"), &ApplyOptions::default());
        assert!(matches!(
            result,
            Err(DirforgeError::Application(ApplicationError::FilesystemError { .. }))
        ));
    }

    #[test]
    fn skip_flags_suppress_metadata() {
        let mut fs = writable_base();
        fs.expect_exists().return_const(false);
        fs.expect_is_dir().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_set_mode().never();
        fs.expect_set_owner().never();
        let service = ScaffoldService::new(Box::new(fs));

        let options = ApplyOptions {
            skip_permissions: true,
            skip_ownership: true,
            ..ApplyOptions::default()
        };
        let report = service
            .apply(&tree_with_metadata(), Path::new("/base"), &options)
            .unwrap();
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.outcomes.len(), 2);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(PathBuf::from("/base")))
            .return_const(true);
        fs.expect_exists().return_const(false);
        fs.expect_is_dir()
            .with(eq(PathBuf::from("/base")))
            .return_const(true);
        fs.expect_is_dir().return_const(false);
        fs.expect_is_writable().never();
        fs.expect_create_dir_all().never();
        fs.expect_create_file().never();
        fs.expect_set_mode().never();
        fs.expect_set_owner().never();
        let service = ScaffoldService::new(Box::new(fs));

        let options = ApplyOptions {
            dry_run: true,
            ..ApplyOptions::default()
        };
        let report = service
            .apply(&tree_with_metadata(), Path::new("/base"), &options)
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.directories_created(), 2);
        assert!(report
            .outcomes
            .iter()
            .any(|o| matches!(o, Outcome::PermissionsApplied { .. })));
    }

    #[test]
    fn existing_files_are_left_alone() {
        let tree = DirectoryTree::new()
            .with_root(TreeNode::new("app").with_default_file("README.md"));

        let mut fs = writable_base();
        fs.expect_is_dir().return_const(true).times(1).with(eq(PathBuf::from("/base/app")));
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(true);
        fs.expect_create_file().never();
        let service = ScaffoldService::new(Box::new(fs));

        let report = service
            .apply(&tree, Path::new("/base"), &ApplyOptions::default())
            .unwrap();
        assert!(report.is_noop());
        assert_eq!(report.files_existing(), 1);
    }

    #[test]
    fn directory_at_file_path_is_a_warning() {
        let tree = DirectoryTree::new().with_root(
            TreeNode::new("app")
                .with_default_file("notes")
                .with_default_file("README.md"),
        );

        let mut fs = writable_base();
        fs.expect_is_dir()
            .with(eq(PathBuf::from("/base/app/notes")))
            .return_const(true);
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().times(1).returning(|_| Ok(()));
        fs.expect_create_file()
            .times(1)
            .with(eq(PathBuf::from("/base/app/README.md")))
            .returning(|_| Ok(true));
        let service = ScaffoldService::new(Box::new(fs));

        let report = service
            .apply(&tree, Path::new("/base"), &ApplyOptions::default())
            .unwrap();

        assert_eq!(report.warning_count(), 1);
        assert_eq!(
            report.warnings().next().map(Outcome::path),
            Some(Path::new("/base/app/notes"))
        );
        assert_eq!(report.files_created(), 1);
    }

    #[test]
    fn file_creation_failure_is_a_warning() {
        let tree = DirectoryTree::new()
            .with_root(TreeNode::new("app").with_default_file("README.md"))
            .with_root(TreeNode::new("lib"));

        let mut fs = writable_base();
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().times(2).returning(|_| Ok(()));
        fs.expect_create_file().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "No space left on device".into(),
            }
            .into())
        });
        let service = ScaffoldService::new(Box::new(fs));

        let report = service
            .apply(&tree, Path::new("/base"), &ApplyOptions::default())
            .unwrap();

        assert_eq!(report.directories_created(), 2);
        assert_eq!(report.files_created(), 0);
        let warnings: Vec<_> = report.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            Outcome::Warning { message, .. } if message.contains("No space left")
        ));
    }

    #[test]
    fn file_at_directory_path_aborts() {
        let tree = DirectoryTree::new().with_root(TreeNode::new("app"));

        let mut fs = writable_base();
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().never();
        let service = ScaffoldService::new(Box::new(fs));

        let result = service.apply(&tree, Path::new("/base"), &ApplyOptions::default());
        assert!(matches!(
            result,
            Err(DirforgeError::Application(ApplicationError::FilesystemError { .. }))
        ));
    }

    #[test]
    fn dry_run_flags_file_at_directory_path() {
        let tree = DirectoryTree::new()
            .with_root(TreeNode::new("app"))
            .with_root(TreeNode::new("lib"));

        let mut fs = writable_base();
        fs.expect_is_dir().return_const(false);
        fs.expect_exists()
            .with(eq(PathBuf::from("/base/app")))
            .return_const(true);
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().never();
        let service = ScaffoldService::new(Box::new(fs));

        let options = ApplyOptions {
            dry_run: true,
            ..ApplyOptions::default()
        };
        let report = service.apply(&tree, Path::new("/base"), &options).unwrap();

        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.directories_created(), 1);
    }
}
