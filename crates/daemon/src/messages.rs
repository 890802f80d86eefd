//! Operator-facing wording of scheduler and pass events.

use engine::{ReconcileError, SyncEvent};

use crate::interval::Interval;

/// Logged once when the scheduler starts.
pub fn started(interval: Interval) -> String {
    format!("Synchronization started. Interval: {interval} seconds.")
}

/// Logged once when the scheduler exits.
pub const STOPPED: &str = "Synchronization stopped.";

/// Renders a pass event as one log line.
pub fn describe(event: &SyncEvent<'_>) -> String {
    match event {
        SyncEvent::PassStarted { source, replica } => format!(
            "Synchronizing '{}' -> '{}'",
            source.display(),
            replica.display()
        ),
        SyncEvent::ReplicaCreated { path } => format!(
            "Replica folder '{}' doesn't exist, created a new one.",
            path.display()
        ),
        SyncEvent::Copied { name, .. } => format!("Copied: {}", name.to_string_lossy()),
        SyncEvent::Deleted { name } => format!("Deleted: {}", name.to_string_lossy()),
        SyncEvent::CopyFailed { name, error } | SyncEvent::DeleteFailed { name, error } => format!(
            "Error: failed to {} '{}': {error}",
            error.operation().verb(),
            name.to_string_lossy()
        ),
        SyncEvent::PassFinished { summary } => format!(
            "Pass complete: {} copied, {} deleted, {} failed.",
            summary.files_copied(),
            summary.files_deleted(),
            summary.failures().len()
        ),
    }
}

/// Renders a pass-level failure.
pub fn pass_error(error: &ReconcileError) -> String {
    format!("Error: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{CopyReason, PassSummary};
    use std::ffi::OsStr;
    use std::num::NonZeroU64;
    use std::path::{Path, PathBuf};

    #[test]
    fn start_line_names_the_interval() {
        let interval = Interval::from_secs(NonZeroU64::new(15).expect("non-zero"));
        assert_eq!(started(interval), "Synchronization started. Interval: 15 seconds.");
    }

    #[test]
    fn copy_and_delete_lines_use_bare_names() {
        let copied = SyncEvent::Copied {
            name: OsStr::new("a.txt"),
            reason: CopyReason::Missing,
            bytes: 1,
        };
        let deleted = SyncEvent::Deleted {
            name: OsStr::new("c.txt"),
        };
        assert_eq!(describe(&copied), "Copied: a.txt");
        assert_eq!(describe(&deleted), "Deleted: c.txt");
    }

    #[test]
    fn replica_creation_and_pass_start_name_directories() {
        let created = SyncEvent::ReplicaCreated {
            path: Path::new("/mirror"),
        };
        let started = SyncEvent::PassStarted {
            source: Path::new("/src"),
            replica: Path::new("/mirror"),
        };
        assert_eq!(
            describe(&created),
            "Replica folder '/mirror' doesn't exist, created a new one."
        );
        assert_eq!(
            describe(&started),
            "Synchronizing '/src' -> '/mirror'"
        );
    }

    #[test]
    fn pass_summary_line_counts_outcomes() {
        let summary = PassSummary::default();
        let finished = SyncEvent::PassFinished { summary: &summary };
        assert_eq!(
            describe(&finished),
            "Pass complete: 0 copied, 0 deleted, 0 failed."
        );
    }

    #[test]
    fn missing_source_is_reported_as_an_error_line() {
        let error = ReconcileError::SourceMissing {
            path: PathBuf::from("/gone"),
        };
        assert_eq!(pass_error(&error), "Error: Source folder '/gone' doesn't exist.");
    }
}
