//! Apply report - what a run did (or would do).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{Mode, Owner};

/// Options controlling a single apply run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Only query the filesystem; record what would change.
    pub dry_run: bool,
    /// Ignore `permissions` metadata.
    pub skip_permissions: bool,
    /// Ignore `owner` metadata.
    pub skip_ownership: bool,
}

/// One effect of applying a layout entry, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Outcome {
    DirectoryCreated { path: PathBuf },
    DirectoryExists { path: PathBuf },
    FileCreated { path: PathBuf },
    FileExists { path: PathBuf },
    PermissionsApplied { path: PathBuf, mode: Mode },
    OwnerApplied { path: PathBuf, owner: Owner },
    Warning { path: PathBuf, message: String },
}

impl Outcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::DirectoryCreated { path }
            | Self::DirectoryExists { path }
            | Self::FileCreated { path }
            | Self::FileExists { path }
            | Self::PermissionsApplied { path, .. }
            | Self::OwnerApplied { path, .. }
            | Self::Warning { path, .. } => path,
        }
    }

    /// `true` for outcomes that add something new to the filesystem.
    pub fn is_creation(&self) -> bool {
        matches!(self, Self::DirectoryCreated { .. } | Self::FileCreated { .. })
    }
}

/// Ordered record of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub dry_run: bool,
    pub outcomes: Vec<Outcome>,
}

impl ApplyReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            outcomes: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }

    pub fn directories_created(&self) -> usize {
        self.count(|o| matches!(o, Outcome::DirectoryCreated { .. }))
    }

    pub fn directories_existing(&self) -> usize {
        self.count(|o| matches!(o, Outcome::DirectoryExists { .. }))
    }

    pub fn files_created(&self) -> usize {
        self.count(|o| matches!(o, Outcome::FileCreated { .. }))
    }

    pub fn files_existing(&self) -> usize {
        self.count(|o| matches!(o, Outcome::FileExists { .. }))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Warning { .. }))
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Nothing new was (or would be) created.
    pub fn is_noop(&self) -> bool {
        !self.outcomes.iter().any(Outcome::is_creation)
    }
}
