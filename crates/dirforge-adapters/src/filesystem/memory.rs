//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use dirforge_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::{Mode, Owner},
    error::DirforgeResult,
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to a service and
/// inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    modes: HashMap<PathBuf, Mode>,
    owners: HashMap<PathBuf, Owner>,
    read_only: HashSet<PathBuf>,
    deny_metadata: bool,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a directory (and its ancestors).
    pub fn with_directory(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            insert_ancestors(&mut inner.directories, path.as_ref());
        }
        self
    }

    /// Seed a file with content; its ancestors become directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
        self
    }

    /// Refuse writes inside `path`.
    pub fn with_read_only(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(path.as_ref().to_path_buf());
        }
        self
    }

    /// Make every `set_mode` / `set_owner` call fail, like an unprivileged
    /// user trying to chown.
    pub fn deny_metadata(self) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.deny_metadata = true;
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read().ok()?.files.get(path).cloned()
    }

    pub fn mode_of(&self, path: &Path) -> Option<Mode> {
        self.read().ok()?.modes.get(path).copied()
    }

    pub fn owner_of(&self, path: &Path) -> Option<Owner> {
        self.read().ok()?.owners.get(path).cloned()
    }

    /// List all directories, sorted.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<_> = self
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default();
        dirs.sort();
        dirs
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<_> = self
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    fn read(&self) -> DirforgeResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn write(&self) -> DirforgeResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn fs_error(path: &Path, reason: &str) -> dirforge_core::error::DirforgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

impl MemoryFilesystemInner {
    fn is_read_only(&self, path: &Path) -> bool {
        self.read_only.iter().any(|ro| path.starts_with(ro))
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> DirforgeResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "No such file"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_writable(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path) && !inner.is_read_only(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> DirforgeResult<()> {
        let mut inner = self.write()?;

        if inner.is_read_only(path) {
            return Err(fs_error(path, "Read-only file system"));
        }

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(fs_error(&current, "File exists"));
            }
        }

        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn create_file(&self, path: &Path) -> DirforgeResult<bool> {
        let mut inner = self.write()?;

        if inner.files.contains_key(path) {
            return Ok(false);
        }
        if inner.directories.contains(path) {
            return Err(fs_error(path, "Is a directory"));
        }
        if inner.is_read_only(path) {
            return Err(fs_error(path, "Read-only file system"));
        }

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(path, "Parent directory does not exist"));
            }
        }

        inner.files.insert(path.to_path_buf(), String::new());
        Ok(true)
    }

    fn set_mode(&self, path: &Path, mode: Mode) -> DirforgeResult<()> {
        let mut inner = self.write()?;

        if inner.deny_metadata {
            return Err(fs_error(path, "Operation not permitted"));
        }
        if !inner.directories.contains(path) && !inner.files.contains_key(path) {
            return Err(fs_error(path, "No such file or directory"));
        }

        inner.modes.insert(path.to_path_buf(), mode);
        Ok(())
    }

    fn set_owner(&self, path: &Path, owner: &Owner) -> DirforgeResult<()> {
        let mut inner = self.write()?;

        if inner.deny_metadata {
            return Err(fs_error(path, "Operation not permitted"));
        }
        if !inner.directories.contains(path) && !inner.files.contains_key(path) {
            return Err(fs_error(path, "No such file or directory"));
        }

        inner.owners.insert(path.to_path_buf(), owner.clone());
        Ok(())
    }
}
