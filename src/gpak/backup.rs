//! Backup handling and patch state
//!
//! The first patch copies the pristine archive to `<archive>.bak`; every
//! later patch reads original bytes from that backup, never from a
//! previously patched archive. The backup's presence is the on-disk signal
//! that the archive has been patched at least once.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffix appended to the archive path for its backup.
pub const BACKUP_SUFFIX: &str = "bak";

/// Whether the live archive still holds its original content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchState {
    /// No backup exists; the archive has never been patched.
    Pristine,
    /// A backup exists; the archive has been patched at least once.
    Patched,
}

impl PatchState {
    #[must_use]
    pub fn is_pristine(self) -> bool {
        self == PatchState::Pristine
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PatchState::Pristine => "pristine",
            PatchState::Patched => "patched",
        }
    }
}

/// Path of the backup file for `archive` (`resources.gpak` -> `resources.gpak.bak`).
#[must_use]
pub fn backup_path(archive: &Path) -> PathBuf {
    let mut os = archive.as_os_str().to_os_string();
    os.push(".");
    os.push(BACKUP_SUFFIX);
    PathBuf::from(os)
}

/// Current patch state of `archive`, derived from its backup's presence.
#[must_use]
pub fn patch_state(archive: &Path) -> PatchState {
    if backup_path(archive).is_file() {
        PatchState::Patched
    } else {
        PatchState::Pristine
    }
}

/// Ensure a backup of the pristine archive exists, copying at most once.
///
/// Returns the backup path. If a backup already exists it is left untouched;
/// it is the immutable source of truth for original bytes.
///
/// # Errors
///
/// Returns [`Error::Io`] if the copy fails.
pub fn ensure_backup(archive: &Path) -> Result<PathBuf> {
    let backup = backup_path(archive);

    if !backup.is_file() {
        tracing::info!("Backing up {} to {}", archive.display(), backup.display());
        fs::copy(archive, &backup)?;
    }

    Ok(backup)
}

/// Restore the live archive from its backup.
///
/// Returns the number of bytes restored.
///
/// # Errors
///
/// Returns [`Error::MissingBackup`] when no backup exists and [`Error::Io`]
/// if the copy fails.
pub fn restore(archive: &Path) -> Result<u64> {
    let backup = backup_path(archive);

    if !backup.is_file() {
        return Err(Error::MissingBackup { path: backup });
    }

    tracing::info!("Restoring {} from {}", archive.display(), backup.display());
    Ok(fs::copy(&backup, archive)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("game/resources.gpak")),
            PathBuf::from("game/resources.gpak.bak")
        );
    }

    #[test]
    fn test_state_tracks_backup_presence() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("resources.gpak");
        fs::write(&archive, b"original").unwrap();

        assert_eq!(patch_state(&archive), PatchState::Pristine);
        ensure_backup(&archive).unwrap();
        assert_eq!(patch_state(&archive), PatchState::Patched);
    }

    #[test]
    fn test_backup_copied_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("resources.gpak");
        fs::write(&archive, b"original").unwrap();

        let backup = ensure_backup(&archive).unwrap();
        assert_eq!(fs::read(&backup).unwrap(), b"original");

        // A second call must not overwrite the backup with patched content.
        fs::write(&archive, b"patched!").unwrap();
        ensure_backup(&archive).unwrap();
        assert_eq!(fs::read(&backup).unwrap(), b"original");
    }

    #[test]
    fn test_restore_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("resources.gpak");
        fs::write(&archive, b"original").unwrap();

        ensure_backup(&archive).unwrap();
        fs::write(&archive, b"patched!").unwrap();

        let bytes = restore(&archive).unwrap();
        assert_eq!(bytes, 8);
        assert_eq!(fs::read(&archive).unwrap(), b"original");
    }

    #[test]
    fn test_restore_without_backup_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("resources.gpak");
        fs::write(&archive, b"original").unwrap();

        let err = restore(&archive).unwrap_err();
        assert!(matches!(err, Error::MissingBackup { .. }));
        assert_eq!(fs::read(&archive).unwrap(), b"original");
    }
}
