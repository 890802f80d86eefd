#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` implements the reconciliation pass of `dirmirror`: given a source
//! directory and a replica directory it copies new and updated top-level
//! files into the replica and deletes replica files the source no longer
//! has. Modification times are the only staleness signal.
//!
//! # Design
//!
//! - [`reconcile`] runs one pass and returns a [`PassSummary`]. Callers that
//!   want to observe individual operations supply a [`SyncEventHandler`];
//!   closures taking a [`SyncEvent`] implement the trait directly.
//! - [`SyncPlan`] holds the decisions derived from two
//!   [`metadata::DirectorySnapshot`]s. The copy plan is computed from the
//!   listings taken at pass start; the deletion plan from a replica listing
//!   taken after the copy phase.
//! - [`ReconcileError`] aborts a pass before any mutation of the replica
//!   contents. [`FileOperationError`] affects a single file and is collected
//!   in the summary while the pass continues.
//!
//! # Invariants
//!
//! - The source directory is never modified.
//! - A source file is copied only when the replica lacks it or the source's
//!   modification time is strictly newer.
//! - Every completed copy carries the source's modification time, so an
//!   unchanged source produces an empty plan on the next pass.
//! - The deletion phase starts only after the copy phase has finished.
//!
//! # Examples
//!
//! ```
//! use engine::reconcile_quiet;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let source = temp.path().join("source");
//! let replica = temp.path().join("replica");
//! std::fs::create_dir(&source)?;
//! std::fs::write(source.join("a.txt"), b"1")?;
//!
//! let summary = reconcile_quiet(&source, &replica)?;
//! assert!(summary.replica_created());
//! assert_eq!(summary.files_copied(), 1);
//!
//! let again = reconcile_quiet(&source, &replica)?;
//! assert!(again.is_noop());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod error;
mod event;
mod plan;
mod reconcile;
mod summary;

pub use error::{FileOperation, FileOperationError, ReconcileError, ReconcileResult};
pub use event::{IgnoreEvents, SyncEvent, SyncEventHandler};
pub use plan::{CopyReason, PlannedAction, SyncAction, SyncPlan, copy_reason};
pub use reconcile::{STAGING_PREFIX, reconcile, reconcile_quiet};
pub use summary::{FileFailure, PassSummary};
