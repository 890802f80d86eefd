use std::ffi::{OsStr, OsString};

use crate::error::{FileOperation, FileOperationError};
use crate::plan::CopyReason;

/// A per-file failure recorded during a pass.
#[derive(Debug)]
pub struct FileFailure {
    name: OsString,
    error: FileOperationError,
}

impl FileFailure {
    pub(crate) fn new(name: &OsStr, error: FileOperationError) -> Self {
        Self {
            name: name.to_os_string(),
            error,
        }
    }

    /// Returns the file name that failed.
    #[must_use]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Returns the failed operation.
    #[must_use]
    pub const fn operation(&self) -> FileOperation {
        self.error.operation()
    }

    /// Returns the underlying error.
    #[must_use]
    pub const fn error(&self) -> &FileOperationError {
        &self.error
    }
}

/// Outcome of a pass that ran to completion.
///
/// A pass that hit per-file failures still produces a summary; inspect
/// [`PassSummary::failures`] or [`PassSummary::is_clean`].
#[derive(Debug, Default)]
pub struct PassSummary {
    files_created: u64,
    files_updated: u64,
    files_deleted: u64,
    files_up_to_date: u64,
    bytes_copied: u64,
    replica_created: bool,
    failures: Vec<FileFailure>,
}

impl PassSummary {
    pub(crate) fn record_copy(&mut self, reason: CopyReason, bytes: u64) {
        match reason {
            CopyReason::Missing => self.files_created += 1,
            CopyReason::Stale => self.files_updated += 1,
        }
        self.bytes_copied += bytes;
    }

    pub(crate) fn record_deletion(&mut self) {
        self.files_deleted += 1;
    }

    pub(crate) fn record_up_to_date(&mut self, count: u64) {
        self.files_up_to_date += count;
    }

    pub(crate) fn record_replica_created(&mut self) {
        self.replica_created = true;
    }

    pub(crate) fn record_failure(&mut self, failure: FileFailure) {
        self.failures.push(failure);
    }

    /// Number of files written into the replica, new or updated.
    #[must_use]
    pub const fn files_copied(&self) -> u64 {
        self.files_created + self.files_updated
    }

    /// Number of files copied because the replica lacked them.
    #[must_use]
    pub const fn files_created(&self) -> u64 {
        self.files_created
    }

    /// Number of stale replica files overwritten.
    #[must_use]
    pub const fn files_updated(&self) -> u64 {
        self.files_updated
    }

    /// Number of extraneous replica files removed.
    #[must_use]
    pub const fn files_deleted(&self) -> u64 {
        self.files_deleted
    }

    /// Number of source files whose replica copy was already current.
    #[must_use]
    pub const fn files_up_to_date(&self) -> u64 {
        self.files_up_to_date
    }

    /// Total bytes written into the replica.
    #[must_use]
    pub const fn bytes_copied(&self) -> u64 {
        self.bytes_copied
    }

    /// Reports whether the pass had to create the replica directory.
    #[must_use]
    pub const fn replica_created(&self) -> bool {
        self.replica_created
    }

    /// Per-file failures in the order they happened.
    #[must_use]
    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    /// Reports whether every planned operation succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Reports whether the pass changed nothing in the replica.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.files_copied() == 0 && self.files_deleted == 0 && !self.replica_created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn counters_accumulate() {
        let mut summary = PassSummary::default();
        assert!(summary.is_noop());
        summary.record_copy(CopyReason::Missing, 10);
        summary.record_copy(CopyReason::Stale, 5);
        summary.record_deletion();
        summary.record_up_to_date(3);

        assert_eq!(summary.files_copied(), 2);
        assert_eq!(summary.files_created(), 1);
        assert_eq!(summary.files_updated(), 1);
        assert_eq!(summary.files_deleted(), 1);
        assert_eq!(summary.files_up_to_date(), 3);
        assert_eq!(summary.bytes_copied(), 15);
        assert!(!summary.is_noop());
        assert!(summary.is_clean());
    }

    #[test]
    fn failures_mark_the_pass_unclean() {
        let mut summary = PassSummary::default();
        summary.record_failure(FileFailure::new(
            OsStr::new("locked.bin"),
            FileOperationError::delete(
                Path::new("replica/locked.bin"),
                io::Error::from(io::ErrorKind::PermissionDenied),
            ),
        ));

        assert!(!summary.is_clean());
        let failure = &summary.failures()[0];
        assert_eq!(failure.name(), OsStr::new("locked.bin"));
        assert_eq!(failure.operation(), FileOperation::Delete);
    }
}
