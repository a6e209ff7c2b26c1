//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `dirforge-adapters` crate provides implementations.

use crate::domain::{ConfigFormat, DirectoryTree, Mode, Owner};
use crate::error::DirforgeResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `dirforge_adapters::filesystem::LocalFilesystem` (production)
/// - `dirforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Paths handed to the port are already joined onto the base directory
/// - `create_file` must never truncate an existing file
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole text file.
    fn read_to_string(&self, path: &Path) -> DirforgeResult<String>;

    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check whether new entries can be created inside `path`.
    fn is_writable(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> DirforgeResult<()>;

    /// Create an empty file if nothing exists at `path`.
    ///
    /// Returns `Ok(false)` when the file already existed; its content is
    /// left untouched.
    fn create_file(&self, path: &Path) -> DirforgeResult<bool>;

    /// Set permission bits.
    fn set_mode(&self, path: &Path, mode: Mode) -> DirforgeResult<()>;

    /// Change user and/or group ownership.
    fn set_owner(&self, path: &Path, owner: &Owner) -> DirforgeResult<()>;
}

/// Port for tree description parsing.
///
/// Implemented by:
/// - `dirforge_adapters::parser::IndentParser` (indentation-based text)
/// - `dirforge_adapters::parser::YamlParser` (YAML with per-node metadata)
#[cfg_attr(test, mockall::automock)]
pub trait TreeParser: Send + Sync {
    /// The format this parser understands.
    fn format(&self) -> ConfigFormat;

    /// Parse a tree description. The result is validated by the caller.
    fn parse(&self, source: &str) -> DirforgeResult<DirectoryTree>;
}
