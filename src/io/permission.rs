//! Permission gate run before every read or write.
//!
//! The check and the I/O that follows it are separate filesystem calls, so a
//! file can change mode in between. Callers still have to handle I/O errors
//! from the operation itself.

use crate::error::PermissionError;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessRight {
    Read,
    Write,
    Execute,
}

impl AccessRight {
    /// Evaluation order of a check. A file missing every right reports `Read`.
    pub const ALL: [AccessRight; 3] = [AccessRight::Read, AccessRight::Write, AccessRight::Execute];

    #[cfg(unix)]
    fn access_mode(self) -> libc::c_int {
        match self {
            AccessRight::Read => libc::R_OK,
            AccessRight::Write => libc::W_OK,
            AccessRight::Execute => libc::X_OK,
        }
    }

    fn denied(self, path: &Path) -> PermissionError {
        let path = path.to_path_buf();
        match self {
            AccessRight::Read => PermissionError::Read { path },
            AccessRight::Write => PermissionError::Write { path },
            AccessRight::Execute => PermissionError::Execute { path },
        }
    }
}

/// Verifies that `path` is an existing regular file the current user holds
/// every right in `rights` on. Performs no open, read or write.
#[instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn check(path: &Path, rights: &[AccessRight]) -> Result<(), PermissionError> {
    let metadata = fs::metadata(path).map_err(|source| PermissionError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(PermissionError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    for right in AccessRight::ALL.into_iter().filter(|r| rights.contains(r)) {
        if !has_access(path, right) {
            debug!(?right, "access denied");
            return Err(right.denied(path));
        }
    }

    Ok(())
}

/// Asks the kernel whether the effective user may exercise `right` on `path`.
/// Supplementary groups, ACLs and privileged users are all accounted for.
#[cfg(unix)]
pub fn has_access(path: &Path, right: AccessRight) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };

    // SAFETY: c_path is NUL-terminated and outlives the call.
    let status = unsafe {
        libc::faccessat(
            libc::AT_FDCWD,
            c_path.as_ptr(),
            right.access_mode(),
            libc::AT_EACCESS,
        )
    };
    status == 0
}

#[cfg(not(unix))]
pub fn has_access(path: &Path, right: AccessRight) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => match right {
            AccessRight::Write => !metadata.permissions().readonly(),
            AccessRight::Read | AccessRight::Execute => true,
        },
        Err(_) => false,
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs::{File, OpenOptions};
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn file_with_mode(dir: &TempDir, mode: u32) -> std::path::PathBuf {
        let path = dir.path().join("module.py");
        fs::write(&path, "code...").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    fn running_as_root() -> bool {
        // SAFETY: geteuid takes no arguments and cannot fail.
        unsafe { libc::geteuid() == 0 }
    }

    #[test]
    fn test_check_passes_with_rights() {
        let dir = TempDir::new().unwrap();
        let path = file_with_mode(&dir, 0o644);

        assert!(check(&path, &[AccessRight::Read, AccessRight::Write]).is_ok());
        assert!(has_access(&path, AccessRight::Read));
        assert!(!has_access(&path, AccessRight::Execute));
    }

    #[test]
    fn test_execute_right() {
        let dir = TempDir::new().unwrap();
        let path = file_with_mode(&dir, 0o644);

        // No execute bit in any class, so even root is refused.
        let err = check(&path, &[AccessRight::Execute]).unwrap_err();
        assert!(matches!(err, PermissionError::Execute { .. }));
        assert!(err.to_string().starts_with("permission denied [EXECUTE]"));

        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(check(&path, &[AccessRight::Read, AccessRight::Execute]).is_ok());
    }

    #[test]
    fn test_has_access_agrees_with_open_across_modes() {
        let dir = TempDir::new().unwrap();
        for mode in [0o000, 0o200, 0o400, 0o444, 0o600, 0o640, 0o604, 0o066] {
            let path = file_with_mode(&dir, mode);

            let can_read = File::open(&path).is_ok();
            let can_write = OpenOptions::new().append(true).open(&path).is_ok();

            assert_eq!(has_access(&path, AccessRight::Read), can_read, "{mode:o}");
            assert_eq!(has_access(&path, AccessRight::Write), can_write, "{mode:o}");
        }
    }

    #[test]
    fn test_has_access_agrees_with_open_for_files_owned_by_others() {
        // Owned by root with group/other classes deciding access for everyone
        // else, possibly through a supplementary group.
        for system_file in ["/etc/passwd", "/etc/shadow", "/etc/gshadow", "/etc/sudoers"] {
            let path = Path::new(system_file);
            if !path.is_file() {
                continue;
            }
            let can_read = File::open(path).is_ok();
            assert_eq!(
                has_access(path, AccessRight::Read),
                can_read,
                "{system_file}"
            );
            assert_eq!(
                check(path, &[AccessRight::Read]).is_ok(),
                can_read,
                "{system_file}"
            );
        }
    }

    #[test]
    fn test_read_reported_before_write() {
        if running_as_root() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let path = file_with_mode(&dir, 0o000);

        // Listed out of order on purpose.
        let err = check(&path, &[AccessRight::Write, AccessRight::Read]).unwrap_err();
        assert!(matches!(err, PermissionError::Read { .. }));
        assert_eq!(err.path(), path);
    }

    #[test]
    fn test_write_denied_on_read_only() {
        if running_as_root() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let path = file_with_mode(&dir, 0o444);

        assert!(check(&path, &[AccessRight::Read]).is_ok());
        let err = check(&path, &[AccessRight::Read, AccessRight::Write]).unwrap_err();
        assert!(matches!(err, PermissionError::Write { .. }));
        assert!(err.to_string().starts_with("permission denied [WRITE]"));
    }

    #[test]
    fn test_missing_and_directory() {
        let dir = TempDir::new().unwrap();

        let err = check(&dir.path().join("absent.py"), &[AccessRight::Read]).unwrap_err();
        assert!(matches!(err, PermissionError::Metadata { .. }));
        assert!(!err.is_access_denied());

        let err = check(dir.path(), &[AccessRight::Read]).unwrap_err();
        assert!(matches!(err, PermissionError::NotAFile { .. }));
        assert!(!err.is_access_denied());
    }

    #[test]
    fn test_empty_rights_only_checks_file() {
        let dir = TempDir::new().unwrap();
        let path = file_with_mode(&dir, 0o000);

        assert!(check(&path, &[]).is_ok());
    }
}
