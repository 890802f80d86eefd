#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `metadata` gathers the filesystem facts the mirror compares and keeps
//! those facts consistent after a copy. It exposes [`DirectorySnapshot`], a
//! fresh, non-recursive listing of the regular files in one directory, and
//! helpers that stamp a replica file with its source's timestamps.
//!
//! # Invariants
//!
//! - Snapshots never descend into subdirectories.
//! - File names are unique within a snapshot.
//! - An entry whose metadata cannot be read is recorded as an
//!   [`UnreadableEntry`] instead of failing the whole snapshot.
//! - [`restamp_from_entry`] leaves the destination's modification time equal
//!   to the time recorded in the source snapshot, so a later comparison of
//!   the pair reports "not newer".
//!
//! # Errors
//!
//! Every fallible operation returns [`MetadataError`], which carries the
//! attempted action and the path involved.
//!
//! # Examples
//!
//! ```
//! use metadata::DirectorySnapshot;
//! use std::ffi::OsStr;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! std::fs::write(temp.path().join("notes.txt"), b"hello")?;
//!
//! let snapshot = DirectorySnapshot::capture(temp.path())?;
//! assert!(snapshot.contains(OsStr::new("notes.txt")));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod apply;
mod error;
mod snapshot;

pub use apply::restamp_from_entry;
pub use error::MetadataError;
pub use filetime::FileTime;
pub use snapshot::{DirectorySnapshot, FileEntry, UnreadableEntry};
