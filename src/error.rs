use crate::core::detection::EncodingError;
use crate::core::encoding::{DecodeError, EncodeError};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Raised by the permission gate before any file I/O happens.
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("permission denied [READ]: {}", path.display())]
    Read { path: PathBuf },
    #[error("permission denied [WRITE]: {}", path.display())]
    Write { path: PathBuf },
    #[error("permission denied [EXECUTE]: {}", path.display())]
    Execute { path: PathBuf },
    #[error("not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },
    #[error("cannot inspect {}: {source}", path.display())]
    Metadata { path: PathBuf, source: io::Error },
}

impl PermissionError {
    pub fn path(&self) -> &Path {
        match self {
            PermissionError::Read { path }
            | PermissionError::Write { path }
            | PermissionError::Execute { path }
            | PermissionError::NotAFile { path }
            | PermissionError::Metadata { path, .. } => path,
        }
    }

    /// True when a required right is missing, false when the path itself is
    /// unusable (missing, not a regular file).
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            PermissionError::Read { .. }
                | PermissionError::Write { .. }
                | PermissionError::Execute { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum UnparsableReason {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Permission(#[from] PermissionError),
    #[error("unparsable file {}: {reason}", path.display())]
    Unparsable {
        path: PathBuf,
        #[source]
        reason: UnparsableReason,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl ReadError {
    pub(crate) fn unparsable(path: &Path, reason: impl Into<UnparsableReason>) -> Self {
        ReadError::Unparsable {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ReadError::Permission(err) => err.path(),
            ReadError::Unparsable { path, .. } | ReadError::Io { path, .. } => path,
        }
    }

    /// True only for a missing access right; see [`PermissionError::is_access_denied`].
    pub fn is_permission_error(&self) -> bool {
        matches!(self, ReadError::Permission(err) if err.is_access_denied())
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Permission(#[from] PermissionError),
    /// Lines before `content` may already be on disk.
    #[error("cannot write {content:?} to {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        content: String,
        source: EncodeError,
    },
    #[error("failed to write {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl WriteError {
    pub fn path(&self) -> &Path {
        match self {
            WriteError::Permission(err) => err.path(),
            WriteError::Encode { path, .. } | WriteError::Io { path, .. } => path,
        }
    }

    /// True only for a missing access right; see [`PermissionError::is_access_denied`].
    pub fn is_permission_error(&self) -> bool {
        matches!(self, WriteError::Permission(err) if err.is_access_denied())
    }
}
