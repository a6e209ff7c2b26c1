use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{
    error::DomainError,
    value_objects::{Mode, Owner},
};

/// Flattened tree ready for materialization.
///
/// Entries are in creation order: every directory comes before its default
/// files and its children. Paths are relative to the base directory.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub(crate) entries: Vec<LayoutEntry>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_directory(
        &mut self,
        path: impl Into<PathBuf>,
        depth: usize,
        permissions: Option<Mode>,
        owner: Option<Owner>,
    ) {
        self.entries.push(LayoutEntry::Directory(DirectoryEntry {
            path: path.into(),
            depth,
            permissions,
            owner,
        }));
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.entries
            .push(LayoutEntry::File(FileEntry { path: path.into() }));
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();

            if path.is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: path.display().to_string(),
                });
            }

            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.display().to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter_map(|e| match e {
            LayoutEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl DoubleEndedIterator<Item = &DirectoryEntry> {
        self.entries.iter().filter_map(|e| match e {
            LayoutEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEntry {
    Directory(DirectoryEntry),
    File(FileEntry),
}

impl LayoutEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(d) => &d.path,
            Self::File(f) => &f.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    /// Zero for root nodes.
    pub depth: usize,
    pub permissions: Option<Mode>,
    pub owner: Option<Owner>,
}

impl DirectoryEntry {
    pub fn has_metadata(&self) -> bool {
        self.permissions.is_some() || self.owner.is_some()
    }
}

/// A placeholder file, created empty and never overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
}
