//! Execution of a single mirror pass.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use metadata::{DirectorySnapshot, FileEntry, UnreadableEntry, restamp_from_entry};
use tempfile::NamedTempFile;
use tracing::{debug, trace, warn};

use crate::error::{FileOperationError, ReconcileError, ReconcileResult};
use crate::event::{IgnoreEvents, SyncEvent, SyncEventHandler};
use crate::plan::{SyncAction, SyncPlan};
use crate::summary::{FileFailure, PassSummary};

/// Prefix of the staging files written next to their final replica path.
pub const STAGING_PREFIX: &str = ".dirmirror-";

/// Mirrors the top-level files of `source` into `replica`.
///
/// The pass runs two phases. The copy phase writes every source file that is
/// missing from the replica or strictly newer than its replica counterpart,
/// then stamps the replica file with the source's modification time. The
/// deletion phase lists the replica again, after all copies have landed, and
/// removes every file whose name the source listing lacks.
///
/// Per-file failures are reported through `handler` and collected in the
/// returned [`PassSummary`]; they never abort the pass. A source entry whose
/// metadata cannot be read counts as a failed copy and protects its replica
/// counterpart from deletion. Unreadable replica entries are left alone.
///
/// # Errors
///
/// - [`ReconcileError::SourceMissing`] when `source` is not a directory. The
///   replica is left untouched.
/// - [`ReconcileError::ReplicaCreate`] when `replica` is absent and cannot be
///   created.
/// - [`ReconcileError::Snapshot`] when either directory cannot be listed.
pub fn reconcile<H>(source: &Path, replica: &Path, handler: &mut H) -> ReconcileResult<PassSummary>
where
    H: SyncEventHandler + ?Sized,
{
    if !source.is_dir() {
        debug!(target: "dirmirror::engine", source = %source.display(), "source directory missing");
        return Err(ReconcileError::SourceMissing {
            path: source.to_path_buf(),
        });
    }

    let mut summary = PassSummary::default();

    if !replica.exists() {
        fs::create_dir_all(replica).map_err(|error| ReconcileError::ReplicaCreate {
            path: replica.to_path_buf(),
            source: error,
        })?;
        summary.record_replica_created();
        handler.handle(SyncEvent::ReplicaCreated { path: replica });
    }

    handler.handle(SyncEvent::PassStarted { source, replica });

    let mut source_files = DirectorySnapshot::capture(source)?;
    let replica_before = DirectorySnapshot::capture(replica)?;
    report_unreadable_sources(source_files.take_unreadable(), &mut summary, handler);
    run_copy_phase(&source_files, &replica_before, &mut summary, handler);

    let replica_after = DirectorySnapshot::capture(replica)?;
    for skipped in replica_after.unreadable() {
        warn!(target: "dirmirror::engine", error = %skipped.error(), "skipping unreadable replica entry");
    }
    run_deletion_phase(&source_files, &replica_after, &mut summary, handler);

    handler.handle(SyncEvent::PassFinished { summary: &summary });
    Ok(summary)
}

/// Runs [`reconcile`] without observing events.
pub fn reconcile_quiet(source: &Path, replica: &Path) -> ReconcileResult<PassSummary> {
    reconcile(source, replica, &mut IgnoreEvents)
}

fn report_unreadable_sources<H>(
    unreadable: Vec<UnreadableEntry>,
    summary: &mut PassSummary,
    handler: &mut H,
) where
    H: SyncEventHandler + ?Sized,
{
    for skipped in unreadable {
        let (name, error) = skipped.into_parts();
        let error = FileOperationError::from(error);
        debug!(target: "dirmirror::engine", %error, "source entry unreadable");
        handler.handle(SyncEvent::CopyFailed {
            name: &name,
            error: &error,
        });
        summary.record_failure(FileFailure::new(&name, error));
    }
}

fn run_copy_phase<H>(
    source: &DirectorySnapshot,
    replica: &DirectorySnapshot,
    summary: &mut PassSummary,
    handler: &mut H,
) where
    H: SyncEventHandler + ?Sized,
{
    let plan = SyncPlan::copies(source, replica);
    summary.record_up_to_date(plan.up_to_date());
    trace!(
        target: "dirmirror::engine",
        planned = plan.len(),
        up_to_date = plan.up_to_date(),
        "copy phase planned"
    );

    for planned in &plan {
        let SyncAction::Copy(reason) = planned.action() else {
            continue;
        };
        let Some(entry) = source.get(planned.name()) else {
            continue;
        };

        match copy_entry(source.root(), replica.root(), entry) {
            Ok(bytes) => {
                summary.record_copy(reason, bytes);
                handler.handle(SyncEvent::Copied {
                    name: entry.name(),
                    reason,
                    bytes,
                });
            }
            Err(error) => {
                debug!(target: "dirmirror::engine", %error, "copy failed");
                handler.handle(SyncEvent::CopyFailed {
                    name: entry.name(),
                    error: &error,
                });
                summary.record_failure(FileFailure::new(entry.name(), error));
            }
        }
    }
}

fn run_deletion_phase<H>(
    source: &DirectorySnapshot,
    replica: &DirectorySnapshot,
    summary: &mut PassSummary,
    handler: &mut H,
) where
    H: SyncEventHandler + ?Sized,
{
    let plan = SyncPlan::deletions(source, replica);
    trace!(target: "dirmirror::engine", planned = plan.len(), "deletion phase planned");

    for planned in &plan {
        let path = replica.root().join(planned.name());
        match fs::remove_file(&path) {
            Ok(()) => {
                summary.record_deletion();
                handler.handle(SyncEvent::Deleted {
                    name: planned.name(),
                });
            }
            Err(error) => {
                let error = FileOperationError::delete(&path, error);
                debug!(target: "dirmirror::engine", %error, "delete failed");
                handler.handle(SyncEvent::DeleteFailed {
                    name: planned.name(),
                    error: &error,
                });
                summary.record_failure(FileFailure::new(planned.name(), error));
            }
        }
    }
}

/// Writes `entry` from `source_root` into `replica_root`.
///
/// The bytes are staged in a temporary file inside the replica directory and
/// renamed over the final path, so a failed copy never leaves a truncated or
/// unstamped replica file behind and read-only replica files can still be
/// replaced.
fn copy_entry(
    source_root: &Path,
    replica_root: &Path,
    entry: &FileEntry,
) -> Result<u64, FileOperationError> {
    let target = replica_root.join(entry.name());
    let (staged, bytes) = stage_copy(source_root, replica_root, entry)?;
    staged
        .persist(&target)
        .map_err(|error| FileOperationError::copy("install copy of", &target, error.error))?;
    Ok(bytes)
}

/// Fills a staging file with the source bytes, timestamps and permissions.
fn stage_copy(
    source_root: &Path,
    replica_root: &Path,
    entry: &FileEntry,
) -> Result<(NamedTempFile, u64), FileOperationError> {
    let source_path = source_root.join(entry.name());

    let mut reader = File::open(&source_path)
        .map_err(|error| FileOperationError::copy("open", &source_path, error))?;
    let mut staged = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempfile_in(replica_root)
        .map_err(|error| FileOperationError::copy("stage copy in", replica_root, error))?;

    let bytes = io::copy(&mut reader, staged.as_file_mut())
        .map_err(|error| FileOperationError::copy("copy", &source_path, error))?;

    restamp_from_entry(entry, staged.path())?;

    let permissions = reader
        .metadata()
        .map_err(|error| FileOperationError::copy("inspect", &source_path, error))?
        .permissions();
    staged
        .as_file()
        .set_permissions(permissions)
        .map_err(|error| FileOperationError::copy("set permissions on", staged.path(), error))?;

    Ok((staged, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use metadata::FileTime;
    use tempfile::tempdir;

    #[test]
    fn staged_copy_is_stamped_before_it_is_installed() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("source");
        let replica = temp.path().join("replica");
        fs::create_dir(&source).expect("create source");
        fs::create_dir(&replica).expect("create replica");
        fs::write(source.join("doc"), b"fresh").expect("write source");
        fs::write(replica.join("doc"), b"previous").expect("write replica");
        let modified = FileTime::from_unix_time(1_650_000_000, 0);
        let entry = FileEntry::new("doc", modified);

        let (staged, bytes) = stage_copy(&source, &replica, &entry).expect("stage");

        assert_eq!(bytes, 5);
        let staged_meta = fs::metadata(staged.path()).expect("staged metadata");
        assert_eq!(FileTime::from_last_modification_time(&staged_meta), modified);
        assert_eq!(fs::read(replica.join("doc")).expect("read replica"), b"previous");

        drop(staged);
        let leftovers = fs::read_dir(&replica)
            .expect("read replica")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(STAGING_PREFIX))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn failed_stage_leaves_previous_replica_file() {
        let temp = tempdir().expect("tempdir");
        let source = temp.path().join("source");
        let replica = temp.path().join("replica");
        fs::create_dir(&source).expect("create source");
        fs::create_dir(&replica).expect("create replica");
        fs::write(replica.join("doc"), b"previous").expect("write replica");
        let entry = FileEntry::new("doc", FileTime::from_unix_time(1, 0));

        let error = copy_entry(&source, &replica, &entry).expect_err("source file is missing");

        assert_eq!(error.operation(), crate::FileOperation::Copy);
        assert_eq!(fs::read(replica.join("doc")).expect("read replica"), b"previous");
    }
}
