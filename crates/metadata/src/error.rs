use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error produced when inspecting or updating filesystem metadata fails.
///
/// The error records the attempted action and the path involved so callers can
/// render diagnostics of the form `failed to <action> '<path>': <cause>`.
#[derive(Debug, Error)]
#[error("failed to {action} '{}': {source}", path.display())]
pub struct MetadataError {
    action: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl MetadataError {
    /// Creates a new error from an action description, the affected path and
    /// the underlying I/O failure.
    pub fn new(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the action that failed.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        self.action
    }

    /// Returns the path involved in the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the underlying I/O error kind.
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}
