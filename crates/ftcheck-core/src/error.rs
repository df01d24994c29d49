//! Error types for the ftcheck-core library.
//!
//! This module provides the fixed error taxonomy using the `thiserror` crate,
//! with one variant per operating-system failure class so that callers can
//! distinguish "does not exist" from "exists but unreadable".

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Result type alias for ftcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Typed error for all detection and scanning failures
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Path does not exist
    #[error("file not found: {path}")]
    NotFound {
        /// Path that could not be found
        path: PathBuf,
    },

    /// Access to the path was refused
    #[error("permission denied: {path}")]
    PermissionDenied {
        /// Path that could not be accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A regular-file operation was attempted on a directory
    #[error("path is a directory: {path}")]
    IsDirectory {
        /// The offending path
        path: PathBuf,
    },

    /// Special file, device, or dangling symlink
    #[error("not a regular file: {path}")]
    NotARegularFile {
        /// The offending path
        path: PathBuf,
    },

    /// Any other read or stat failure
    #[error("error reading file '{path}': {source}")]
    Io {
        /// Path being read when the failure occurred
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invariant violation in matching logic (unreachable in practice)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates a new not-found error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates a new permission-denied error
    pub fn permission_denied(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PermissionDenied {
            path: path.into(),
            source,
        }
    }

    /// Creates a new is-a-directory error
    pub fn is_directory(path: impl Into<PathBuf>) -> Self {
        Self::IsDirectory { path: path.into() }
    }

    /// Creates a new not-a-regular-file error
    pub fn not_a_regular_file(path: impl Into<PathBuf>) -> Self {
        Self::NotARegularFile { path: path.into() }
    }

    /// Creates a new generic I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Classifies a raw I/O error into the taxonomy.
    ///
    /// Only the kinds the taxonomy names get their own variant; everything
    /// else collapses into [`Error::Io`].
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path, source),
            _ => Self::io(path, source),
        }
    }

    /// Stable short code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "ENOENT",
            Self::PermissionDenied { .. } => "EACCES",
            Self::IsDirectory { .. } => "EISDIR",
            Self::NotARegularFile { .. } => "ENOTFILE",
            Self::Io { .. } => "EIO",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Numeric severity hint for process exit-code mapping
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. } => 3,
            Self::PermissionDenied { .. } => 4,
            Self::IsDirectory { .. } | Self::NotARegularFile { .. } => 5,
            Self::Io { .. } | Self::Internal(_) => 1,
        }
    }

    /// Path this error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path, .. }
            | Self::IsDirectory { path }
            | Self::NotARegularFile { path }
            | Self::Io { path, .. } => Some(path),
            Self::Internal(_) => None,
        }
    }

    /// Converts this error into a non-fatal [`Problem`] record
    pub fn to_problem(&self) -> Problem {
        let mut details = BTreeMap::new();
        if let Some(path) = self.path() {
            details.insert("path".to_string(), path.display().to_string());
        }
        Problem {
            path: self.path().map(Path::to_path_buf),
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}

/// A structured, non-fatal failure record.
///
/// Problems are collected alongside successful results during path scanning
/// instead of aborting the overall operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    /// Path the problem refers to, if any (not serialized; the code and
    /// details carry the user-facing form)
    #[serde(skip)]
    pub path: Option<PathBuf>,
    /// Stable short code, same values as [`Error::code`]
    pub code: &'static str,
    /// Human-readable description
    pub message: String,
    /// Structured context, keyed by field name
    pub details: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("/missing/file");
        assert!(err.to_string().contains("file not found"));
        assert!(err.to_string().contains("/missing/file"));
    }

    #[test]
    fn test_codes_and_exit_hints() {
        assert_eq!(Error::not_found("/a").code(), "ENOENT");
        assert_eq!(Error::not_found("/a").exit_code(), 3);
        assert_eq!(Error::is_directory("/a").code(), "EISDIR");
        assert_eq!(Error::is_directory("/a").exit_code(), 5);
        assert_eq!(Error::internal("boom").code(), "INTERNAL");
        assert_eq!(Error::internal("boom").exit_code(), 1);
    }

    #[test]
    fn test_from_io_classifies_kinds() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            Error::from_io("/a", not_found),
            Error::NotFound { .. }
        ));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(
            Error::from_io("/a", denied),
            Error::PermissionDenied { .. }
        ));

        let other = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(Error::from_io("/a", other), Error::Io { .. }));
    }

    #[test]
    fn test_to_problem_carries_path() {
        let problem = Error::not_found("/missing/file").to_problem();
        assert_eq!(problem.code, "ENOENT");
        assert_eq!(problem.details.get("path").unwrap(), "/missing/file");
        assert_eq!(problem.path.as_deref(), Some(Path::new("/missing/file")));
    }
}
