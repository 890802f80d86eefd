use std::path::Path;

use filetime::set_file_times;

use crate::error::MetadataError;
use crate::snapshot::FileEntry;

/// Stamps `destination` with the modification time recorded in `entry`.
///
/// The access time is set to the same value. The source is not re-read, so a
/// source edited mid-copy still compares newer on the next pass.
pub fn restamp_from_entry(entry: &FileEntry, destination: &Path) -> Result<(), MetadataError> {
    set_file_times(destination, entry.modified(), entry.modified())
        .map_err(|error| MetadataError::new("preserve timestamps", destination, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn restamp_reports_missing_destination() {
        let temp = tempdir().expect("tempdir");
        let entry = FileEntry::new("absent", FileTime::from_unix_time(1, 0));
        let error = restamp_from_entry(&entry, &temp.path().join("absent"))
            .expect_err("missing destination");
        assert_eq!(error.action(), "preserve timestamps");
    }

    #[test]
    fn restamp_from_entry_uses_snapshot_time() {
        let temp = tempdir().expect("tempdir");
        let dest = temp.path().join("dest");
        fs::write(&dest, b"data").expect("write dest");

        let mtime = FileTime::from_unix_time(1_500_000_000, 0);
        let entry = FileEntry::new("dest", mtime);
        restamp_from_entry(&entry, &dest).expect("restamp");

        let dest_meta = fs::metadata(&dest).expect("dest metadata");
        assert_eq!(FileTime::from_last_modification_time(&dest_meta), mtime);
    }
}
