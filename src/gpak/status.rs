//! Archive status reporting

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::Result;

use super::backup::{backup_path, patch_state, PatchState};
use super::directory::payload_len;
use super::extract::is_text_resource;
use super::reader::GpakReader;

/// Aggregate information about an archive and its patch state.
#[derive(Debug, Serialize)]
pub struct ArchiveStatus {
    /// Archive path as given by the caller.
    pub archive: String,
    /// `pristine` or `patched`.
    pub state: String,
    /// Number of directory entries.
    pub entry_count: usize,
    /// Entries carrying a known text extension.
    pub text_entry_count: usize,
    /// Byte length of the directory table.
    pub directory_bytes: u64,
    /// Total declared payload bytes.
    pub payload_bytes: u64,
    /// When the backup was created, if one exists.
    pub backed_up_at: Option<String>,
}

impl ArchiveStatus {
    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonError`] if serialization fails.
    ///
    /// [`Error::JsonError`]: crate::Error::JsonError
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Gather status for the archive at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the archive cannot be opened and
/// [`Error::MalformedArchive`] if its directory is truncated.
///
/// [`Error::Io`]: crate::Error::Io
/// [`Error::MalformedArchive`]: crate::Error::MalformedArchive
pub fn archive_status(path: &Path) -> Result<ArchiveStatus> {
    let reader = GpakReader::open(path)?;
    let entries = reader.entries();

    let state = patch_state(path);
    let backed_up_at = match state {
        PatchState::Patched => backup_timestamp(path),
        PatchState::Pristine => None,
    };

    Ok(ArchiveStatus {
        archive: path.display().to_string(),
        state: state.as_str().to_string(),
        entry_count: entries.len(),
        text_entry_count: entries
            .iter()
            .filter(|e| is_text_resource(&e.name))
            .count(),
        directory_bytes: reader.data_start(),
        payload_bytes: payload_len(entries),
        backed_up_at,
    })
}

fn backup_timestamp(archive: &Path) -> Option<String> {
    let modified = fs::metadata(backup_path(archive)).ok()?.modified().ok()?;
    let local: DateTime<Local> = modified.into();
    Some(local.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpak::backup::ensure_backup;
    use crate::gpak::directory::{encode_directory, DirectoryEntry};

    fn write_archive(path: &Path) {
        let dir = vec![
            DirectoryEntry::new("data/text/items.csv", 4),
            DirectoryEntry::new("sprites/cat.png", 6),
        ];
        let mut bytes = encode_directory(&dir).unwrap();
        bytes.extend_from_slice(b"abcd");
        bytes.extend_from_slice(b"\x89PNG\r\n");
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_status_counts_and_state() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("resources.gpak");
        write_archive(&archive);

        let status = archive_status(&archive).unwrap();
        assert_eq!(status.state, "pristine");
        assert_eq!(status.entry_count, 2);
        assert_eq!(status.text_entry_count, 1);
        assert_eq!(status.payload_bytes, 10);
        assert!(status.backed_up_at.is_none());

        ensure_backup(&archive).unwrap();
        let status = archive_status(&archive).unwrap();
        assert_eq!(status.state, "patched");
        assert!(status.backed_up_at.is_some());
    }

    #[test]
    fn test_status_serializes() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("resources.gpak");
        write_archive(&archive);

        let json = archive_status(&archive).unwrap().to_json().unwrap();
        assert!(json.contains("\"entry_count\": 2"));
        assert!(json.contains("\"state\": \"pristine\""));
    }
}
