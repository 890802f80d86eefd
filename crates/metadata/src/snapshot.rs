use std::collections::{HashMap, HashSet};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::error::MetadataError;

/// A regular file discovered at the top level of a directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileEntry {
    name: OsString,
    modified: FileTime,
}

impl FileEntry {
    /// Creates an entry from its components.
    #[must_use]
    pub fn new(name: impl Into<OsString>, modified: FileTime) -> Self {
        Self {
            name: name.into(),
            modified,
        }
    }

    /// Builds an entry from a name and the metadata returned by the filesystem.
    #[must_use]
    pub fn from_metadata(name: OsString, metadata: &fs::Metadata) -> Self {
        Self {
            name,
            modified: FileTime::from_last_modification_time(metadata),
        }
    }

    /// Returns the file name relative to the snapshotted directory.
    #[must_use]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Returns the last modification time recorded when the snapshot was taken.
    #[must_use]
    pub const fn modified(&self) -> FileTime {
        self.modified
    }
}

/// A directory entry whose metadata could not be read.
///
/// Typical causes are symbolic link loops and links whose target is not
/// accessible. The entry is kept out of the listing and reported here.
#[derive(Debug)]
pub struct UnreadableEntry {
    name: OsString,
    error: MetadataError,
}

impl UnreadableEntry {
    /// Returns the entry name relative to the snapshotted directory.
    #[must_use]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Returns the failure raised while inspecting the entry.
    #[must_use]
    pub const fn error(&self) -> &MetadataError {
        &self.error
    }

    /// Splits the entry into its name and error.
    #[must_use]
    pub fn into_parts(self) -> (OsString, MetadataError) {
        (self.name, self.error)
    }
}

/// Top-level file listing of a single directory.
///
/// Entries keep the order in which the filesystem enumerated them. Only
/// regular files (and symbolic links that resolve to regular files) are
/// recorded; subdirectories and special files are skipped because the
/// mirror never recurses.
#[derive(Debug, Default)]
pub struct DirectorySnapshot {
    root: PathBuf,
    entries: Vec<FileEntry>,
    index: HashMap<OsString, usize>,
    unreadable: Vec<UnreadableEntry>,
    unreadable_names: HashSet<OsString>,
}

impl DirectorySnapshot {
    /// Reads the top-level files of `root`.
    ///
    /// Entries that vanish between enumeration and the metadata query are
    /// skipped. Entries whose metadata cannot be read for any other reason
    /// are recorded in [`unreadable`](Self::unreadable); only a failure to
    /// read the directory itself is an error.
    pub fn capture(root: &Path) -> Result<Self, MetadataError> {
        let reader =
            fs::read_dir(root).map_err(|error| MetadataError::new("read directory", root, error))?;

        let mut snapshot = Self {
            root: root.to_path_buf(),
            ..Self::default()
        };

        for entry in reader {
            let entry =
                entry.map_err(|error| MetadataError::new("read directory entry", root, error))?;
            let path = entry.path();
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(error) if error.kind() == io::ErrorKind::NotFound => continue,
                Err(error) => {
                    snapshot.unreadable_names.insert(entry.file_name());
                    snapshot.unreadable.push(UnreadableEntry {
                        name: entry.file_name(),
                        error: MetadataError::new("inspect file", &path, error),
                    });
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            snapshot.push(FileEntry::from_metadata(entry.file_name(), &metadata));
        }

        Ok(snapshot)
    }

    /// Builds a snapshot from pre-computed entries. Later duplicates of a
    /// name replace the earlier entry.
    #[must_use]
    pub fn from_entries<I>(root: impl Into<PathBuf>, entries: I) -> Self
    where
        I: IntoIterator<Item = FileEntry>,
    {
        let mut snapshot = Self {
            root: root.into(),
            ..Self::default()
        };
        for entry in entries {
            snapshot.push(entry);
        }
        snapshot
    }

    fn push(&mut self, entry: FileEntry) {
        if let Some(&slot) = self.index.get(entry.name()) {
            self.entries[slot] = entry;
        } else {
            self.index.insert(entry.name().to_os_string(), self.entries.len());
            self.entries.push(entry);
        }
    }

    /// Entries skipped because their metadata could not be read.
    #[must_use]
    pub fn unreadable(&self) -> &[UnreadableEntry] {
        &self.unreadable
    }

    /// Removes and returns the unreadable entries.
    ///
    /// [`is_unreadable`](Self::is_unreadable) keeps answering for the taken
    /// names.
    pub fn take_unreadable(&mut self) -> Vec<UnreadableEntry> {
        std::mem::take(&mut self.unreadable)
    }

    /// Reports whether `name` was present but its metadata could not be read.
    #[must_use]
    pub fn is_unreadable(&self, name: &OsStr) -> bool {
        self.unreadable_names.contains(name)
    }

    /// Returns the directory this snapshot describes.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Looks up an entry by file name.
    #[must_use]
    pub fn get(&self, name: &OsStr) -> Option<&FileEntry> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// Reports whether a file with `name` was present.
    #[must_use]
    pub fn contains(&self, name: &OsStr) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates entries in enumeration order.
    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    /// Returns the number of files recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the directory held no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a DirectorySnapshot {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
