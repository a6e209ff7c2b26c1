//! Local filesystem adapter using std::fs.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use tracing::{debug, trace};
use uuid::Uuid;

use dirforge_core::{
    application::ports::Filesystem,
    domain::{Mode, Owner},
    error::{DirforgeError, DirforgeResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> DirforgeResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// Probes by creating and removing a uniquely named file; permission
    /// bits alone don't account for root, ACLs, or read-only mounts.
    fn is_writable(&self, path: &Path) -> bool {
        let probe = path.join(format!(".dirforge-probe-{}", Uuid::new_v4().simple()));
        match OpenOptions::new().write(true).create_new(true).open(&probe) {
            Ok(_) => {
                if let Err(e) = std::fs::remove_file(&probe) {
                    debug!(path = %probe.display(), error = %e, "Failed to remove write probe");
                }
                true
            }
            Err(e) => {
                trace!(path = %path.display(), error = %e, "Write probe failed");
                false
            }
        }
    }

    fn create_dir_all(&self, path: &Path) -> DirforgeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn create_file(&self, path: &Path) -> DirforgeResult<bool> {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(map_io_error(path, e, "create file")),
        }
    }

    fn set_mode(&self, path: &Path, mode: Mode) -> DirforgeResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode.bits()))
                .map_err(|e| map_io_error(path, e, "set permissions"))
        }
        #[cfg(not(unix))]
        {
            let _ = mode;
            Err(unsupported(path, "permissions"))
        }
    }

    fn set_owner(&self, path: &Path, owner: &Owner) -> DirforgeResult<()> {
        #[cfg(unix)]
        {
            if let Some((uid, gid)) = owner.numeric_ids() {
                return std::os::unix::fs::chown(path, uid, gid)
                    .map_err(|e| map_io_error(path, e, "change owner"));
            }
            run_chown(path, owner)
        }
        #[cfg(not(unix))]
        {
            let _ = owner;
            Err(unsupported(path, "ownership"))
        }
    }
}

/// Named users and groups are resolved by the system `chown`, which knows
/// about NSS sources (LDAP, sssd) that a plain passwd lookup would miss.
#[cfg(unix)]
fn run_chown(path: &Path, owner: &Owner) -> DirforgeResult<()> {
    let owner_arg = owner.to_string();
    debug!(path = %path.display(), owner = %owner_arg, "Running chown");

    let output = std::process::Command::new("chown")
        .arg(&owner_arg)
        .arg("--")
        .arg(path)
        .output()
        .map_err(|e| map_io_error(path, e, "execute chown"))?;

    if output.status.success() {
        return Ok(());
    }

    Err(chown_failed(path, &output))
}

#[cfg(unix)]
fn chown_failed(path: &Path, output: &std::process::Output) -> DirforgeError {
    use dirforge_core::application::ApplicationError;

    let stderr = String::from_utf8_lossy(&output.stderr);
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!(
            "chown failed (exit {}): {}",
            output.status.code().unwrap_or(-1),
            stderr.trim()
        ),
    }
    .into()
}

#[cfg(not(unix))]
fn unsupported(path: &Path, what: &str) -> DirforgeError {
    use dirforge_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("{what} are not supported on this platform"),
    }
    .into()
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> DirforgeError {
    use dirforge_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_file_never_truncates() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("notes.txt");
        std::fs::write(&file, "keep me").unwrap();

        let fs = LocalFilesystem::new();
        assert!(!fs.create_file(&file).unwrap());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "keep me");
    }

    #[test]
    fn create_file_reports_creation() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("new.txt");

        let fs = LocalFilesystem::new();
        assert!(fs.create_file(&file).unwrap());
        assert!(file.is_file());
        assert_eq!(std::fs::metadata(&file).unwrap().len(), 0);
    }

    #[test]
    fn create_file_without_parent_fails() {
        let temp = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        assert!(fs.create_file(&temp.path().join("missing/x")).is_err());
    }

    #[test]
    fn writable_probe_leaves_no_trace() {
        let temp = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();

        assert!(fs.is_writable(temp.path()));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
        assert!(!fs.is_writable(&temp.path().join("does-not-exist")));
    }

    #[test]
    fn create_dir_over_file_fails() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let fs = LocalFilesystem::new();
        assert!(fs.create_dir_all(&blocker.join("child")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn set_mode_applies_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("private");
        std::fs::create_dir(&dir).unwrap();

        let fs = LocalFilesystem::new();
        fs.set_mode(&dir, Mode::new(0o750).unwrap()).unwrap();

        let mode = std::fs::metadata(&dir).unwrap().permissions().mode() & 0o7777;
        assert_eq!(mode, 0o750);
    }

    #[cfg(unix)]
    #[test]
    fn set_owner_to_current_ids_succeeds() {
        use std::os::unix::fs::MetadataExt;

        let temp = tempfile::tempdir().unwrap();
        let meta = std::fs::metadata(temp.path()).unwrap();
        let owner: Owner = format!("{}:{}", meta.uid(), meta.gid()).parse().unwrap();

        let fs = LocalFilesystem::new();
        assert!(fs.set_owner(temp.path(), &owner).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn set_owner_unknown_user_fails() {
        let temp = tempfile::tempdir().unwrap();
        let owner: Owner = "no-such-user-dirforge".parse().unwrap();

        let fs = LocalFilesystem::new();
        assert!(fs.set_owner(temp.path(), &owner).is_err());
    }
}
