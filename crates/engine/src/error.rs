//! Error types produced by a reconciliation pass.

use std::io;
use std::path::{Path, PathBuf};

use metadata::MetadataError;
use thiserror::Error;

/// Result type for a reconciliation pass.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Failure that aborts a whole pass before or while reading directory listings.
///
/// None of these variants is fatal to the scheduler: the pass is abandoned and
/// the next scheduled pass tries again.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The source directory does not exist (or is not a directory).
    #[error("Source folder '{}' doesn't exist.", path.display())]
    SourceMissing {
        /// Path that was expected to hold the source tree.
        path: PathBuf,
    },
    /// The replica directory was missing and could not be created.
    #[error("failed to create replica folder '{}': {source}", path.display())]
    ReplicaCreate {
        /// Replica path that could not be created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A directory listing could not be read.
    #[error(transparent)]
    Snapshot(#[from] MetadataError),
}

impl ReconcileError {
    /// Reports whether the pass was skipped because the source was absent.
    #[must_use]
    pub const fn is_source_missing(&self) -> bool {
        matches!(self, Self::SourceMissing { .. })
    }

    /// Returns the directory the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::SourceMissing { path } | Self::ReplicaCreate { path, .. } => path,
            Self::Snapshot(error) => error.path(),
        }
    }
}

/// The kind of filesystem mutation a per-file failure interrupted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileOperation {
    /// Writing a source file into the replica.
    Copy,
    /// Removing an extraneous replica file.
    Delete,
}

impl FileOperation {
    /// Returns the verb used in log lines.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Delete => "delete",
        }
    }
}

/// Failure affecting a single file. The rest of the pass continues.
#[derive(Debug, Error)]
pub enum FileOperationError {
    /// Staging or writing the replica copy failed.
    #[error("failed to {action} '{}': {source}", path.display())]
    Copy {
        /// Step of the copy that failed.
        action: &'static str,
        /// Path involved in the failed step.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The source file could not be inspected, or the staged copy could not
    /// be stamped with the source's timestamps.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    /// Removing the replica file failed.
    #[error("failed to remove '{}': {source}", path.display())]
    Delete {
        /// Replica file that could not be removed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl FileOperationError {
    pub(crate) fn copy(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Copy {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn delete(path: &Path, source: io::Error) -> Self {
        Self::Delete {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns which operation failed.
    #[must_use]
    pub const fn operation(&self) -> FileOperation {
        match self {
            Self::Copy { .. } | Self::Metadata(_) => FileOperation::Copy,
            Self::Delete { .. } => FileOperation::Delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_missing_renders_operator_message() {
        let error = ReconcileError::SourceMissing {
            path: PathBuf::from("/data/src"),
        };
        assert_eq!(error.to_string(), "Source folder '/data/src' doesn't exist.");
        assert!(error.is_source_missing());
        assert_eq!(error.path(), Path::new("/data/src"));
    }

    #[test]
    fn replica_create_keeps_io_source() {
        let error = ReconcileError::ReplicaCreate {
            path: PathBuf::from("/ro/replica"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(!error.is_source_missing());
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("/ro/replica"));
    }

    #[test]
    fn file_errors_classify_their_operation() {
        let copy = FileOperationError::copy(
            "install copy of",
            Path::new("r/a.txt"),
            io::Error::from(io::ErrorKind::IsADirectory),
        );
        let delete =
            FileOperationError::delete(Path::new("r/c.txt"), io::Error::from(io::ErrorKind::NotFound));

        assert_eq!(copy.operation(), FileOperation::Copy);
        assert_eq!(delete.operation(), FileOperation::Delete);
        assert!(copy.to_string().starts_with("failed to install copy of 'r/a.txt'"));
        assert_eq!(FileOperation::Delete.verb(), "delete");
    }
}
