use std::ffi::OsStr;
use std::path::Path;

use crate::error::FileOperationError;
use crate::plan::CopyReason;
use crate::summary::PassSummary;

/// Notable event emitted while a pass runs.
///
/// Events borrow from the pass and are only valid for the duration of the
/// [`SyncEventHandler::handle`] call.
#[derive(Clone, Copy, Debug)]
pub enum SyncEvent<'a> {
    /// The source was found and the replica is in place; copying begins.
    PassStarted {
        /// Source directory.
        source: &'a Path,
        /// Replica directory.
        replica: &'a Path,
    },
    /// The replica directory did not exist and was created.
    ReplicaCreated {
        /// Created directory.
        path: &'a Path,
    },
    /// A source file was written into the replica.
    Copied {
        /// File name.
        name: &'a OsStr,
        /// Why the copy happened.
        reason: CopyReason,
        /// Bytes written.
        bytes: u64,
    },
    /// An extraneous replica file was removed.
    Deleted {
        /// File name.
        name: &'a OsStr,
    },
    /// Copying a file failed; the pass continues.
    CopyFailed {
        /// File name.
        name: &'a OsStr,
        /// Failure detail.
        error: &'a FileOperationError,
    },
    /// Deleting a file failed; the pass continues.
    DeleteFailed {
        /// File name.
        name: &'a OsStr,
        /// Failure detail.
        error: &'a FileOperationError,
    },
    /// Both phases completed.
    PassFinished {
        /// Final counters of the pass.
        summary: &'a PassSummary,
    },
}

/// Observer invoked for each [`SyncEvent`] emitted during a pass.
pub trait SyncEventHandler {
    /// Handles a newly produced event.
    fn handle(&mut self, event: SyncEvent<'_>);
}

impl<F> SyncEventHandler for F
where
    F: FnMut(SyncEvent<'_>),
{
    fn handle(&mut self, event: SyncEvent<'_>) {
        self(event);
    }
}

/// Handler that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoreEvents;

impl SyncEventHandler for IgnoreEvents {
    fn handle(&mut self, _event: SyncEvent<'_>) {}
}
