//! Derivation of the per-file decisions for one pass.
//!
//! Plans are computed from two [`DirectorySnapshot`]s and hold nothing but
//! names and actions. They are rebuilt on every pass; the copy plan uses the
//! replica listing taken before any copy, while the deletion plan is derived
//! from a listing taken after the copy phase has finished.

use std::ffi::{OsStr, OsString};

use metadata::{DirectorySnapshot, FileEntry};

/// Why a source file is written into the replica.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CopyReason {
    /// The replica has no file with this name.
    Missing,
    /// The replica file is strictly older than the source file.
    Stale,
}

/// Action planned for one file name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyncAction {
    /// Create or overwrite the replica file from the source.
    Copy(CopyReason),
    /// Remove the replica file.
    Delete,
}

/// A single `(name, action)` decision.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlannedAction {
    name: OsString,
    action: SyncAction,
}

impl PlannedAction {
    /// Returns the file name the action applies to.
    #[must_use]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Returns the planned action.
    #[must_use]
    pub const fn action(&self) -> SyncAction {
        self.action
    }
}

/// Ordered set of decisions derived by comparing two snapshots.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SyncPlan {
    actions: Vec<PlannedAction>,
    up_to_date: u64,
}

impl SyncPlan {
    /// Plans the copy phase: every source file that is missing from the
    /// replica or newer than its replica counterpart.
    #[must_use]
    pub fn copies(source: &DirectorySnapshot, replica: &DirectorySnapshot) -> Self {
        let mut plan = Self::default();
        for entry in source {
            match copy_reason(entry, replica.get(entry.name())) {
                Some(reason) => plan.push(entry.name(), SyncAction::Copy(reason)),
                None => plan.up_to_date += 1,
            }
        }
        plan
    }

    /// Plans the deletion phase: every replica file whose name the source
    /// listing does not contain. A source entry that exists but could not be
    /// inspected still protects its replica counterpart.
    #[must_use]
    pub fn deletions(source: &DirectorySnapshot, replica: &DirectorySnapshot) -> Self {
        let mut plan = Self::default();
        for entry in replica {
            if !source.contains(entry.name()) && !source.is_unreadable(entry.name()) {
                plan.push(entry.name(), SyncAction::Delete);
            }
        }
        plan
    }

    fn push(&mut self, name: &OsStr, action: SyncAction) {
        self.actions.push(PlannedAction {
            name: name.to_os_string(),
            action,
        });
    }

    /// Iterates the planned actions in enumeration order.
    pub fn iter(&self) -> std::slice::Iter<'_, PlannedAction> {
        self.actions.iter()
    }

    /// Returns the number of planned actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Reports whether nothing needs to change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns how many source files were found up to date while planning copies.
    #[must_use]
    pub const fn up_to_date(&self) -> u64 {
        self.up_to_date
    }
}

impl<'a> IntoIterator for &'a SyncPlan {
    type Item = &'a PlannedAction;
    type IntoIter = std::slice::Iter<'a, PlannedAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Decides whether `source` must be written over `replica`.
///
/// Only a strictly newer source modification time counts as stale; equal
/// timestamps are treated as up to date so repeated passes stay quiet.
#[must_use]
pub fn copy_reason(source: &FileEntry, replica: Option<&FileEntry>) -> Option<CopyReason> {
    match replica {
        None => Some(CopyReason::Missing),
        Some(existing) if source.modified() > existing.modified() => Some(CopyReason::Stale),
        Some(_) => None,
    }
}
