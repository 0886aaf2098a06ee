//! Loose translation folder install/uninstall
//!
//! The distributed translation ships folders of loose files (`data/`,
//! `swfs/`) that sit next to the archive and override packed resources at
//! runtime. Installing merges them into the game directory; uninstalling
//! removes them so the game falls back to its packed originals.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Loose folders shipped with the translation.
pub const LOOSE_FOLDERS: [&str; 2] = ["data", "swfs"];

/// Per-folder outcome of an install or uninstall.
#[derive(Debug, Default)]
pub struct FolderReport {
    /// `(folder name, files affected)` for each folder processed.
    pub processed: Vec<(String, usize)>,
    /// Folders that were absent and skipped.
    pub skipped: Vec<String>,
}

impl FolderReport {
    /// Total files affected across all folders.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.processed.iter().map(|(_, n)| n).sum()
    }
}

/// Copy the loose translation folders from `base` into `game_dir`.
///
/// Existing files are overwritten (merge semantics); folders missing from
/// `base` are reported as skipped rather than failing the install.
///
/// # Errors
///
/// Returns [`Error::Io`] if a copy fails, for example when the game is
/// running and holds a file open.
///
/// [`Error::Io`]: crate::Error::Io
pub fn install_loose_folders(base: &Path, game_dir: &Path) -> Result<FolderReport> {
    let mut report = FolderReport::default();

    for folder in LOOSE_FOLDERS {
        let src = base.join(folder);
        if !src.is_dir() {
            report.skipped.push(folder.to_string());
            continue;
        }

        let copied = copy_tree(&src, &game_dir.join(folder))?;
        tracing::info!("Installed {folder}/ ({copied} files)");
        report.processed.push((folder.to_string(), copied));
    }

    Ok(report)
}

/// Remove the loose translation folders from `game_dir`.
///
/// Missing folders are reported as skipped.
///
/// # Errors
///
/// Returns [`Error::Io`] if a removal fails.
///
/// [`Error::Io`]: crate::Error::Io
pub fn remove_loose_folders(game_dir: &Path) -> Result<FolderReport> {
    let mut report = FolderReport::default();

    for folder in LOOSE_FOLDERS {
        let target = game_dir.join(folder);
        if !target.is_dir() {
            report.skipped.push(folder.to_string());
            continue;
        }

        let files = count_files(&target);
        fs::remove_dir_all(&target)?;
        tracing::info!("Removed {folder}/ ({files} files)");
        report.processed.push((folder.to_string(), files));
    }

    Ok(report)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| Error::InvalidPath(entry.path().display().to_string()))?;
        let target = dst.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        copied += 1;
    }

    Ok(copied)
}

fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .count()
}
