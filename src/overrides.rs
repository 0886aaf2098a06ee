//! Override directory collection
//!
//! Walks a directory tree of translated files and maps each file to the
//! archive-internal name it replaces: its path relative to the override
//! root, separators normalized to forward slashes.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::gpak::ReplacementSource;
use crate::utils::path::relative_name;

/// Collect replacement sources from every file under `root`.
///
/// Files are returned in deterministic (lexicographic) walk order. Hidden
/// platform junk (`.DS_Store`) is skipped. An empty or missing tree yields
/// an empty set; deciding that nothing matched is the patch planner's job.
///
/// # Errors
///
/// Returns [`Error::WalkDirError`] for traversal failures and
/// [`Error::Io`] if a file's metadata cannot be read.
///
/// [`Error::WalkDirError`]: crate::Error::WalkDirError
/// [`Error::Io`]: crate::Error::Io
pub fn collect_overrides(root: &Path) -> Result<Vec<ReplacementSource>> {
    let mut sources = Vec::new();

    if !root.is_dir() {
        return Ok(sources);
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name() == ".DS_Store" {
            continue;
        }

        let name = relative_name(entry.path(), root)
            .ok_or_else(|| Error::InvalidPath(entry.path().display().to_string()))?;
        let len = entry.metadata()?.len();

        sources.push(ReplacementSource {
            name,
            path: entry.path().to_path_buf(),
            len,
        });
    }

    tracing::debug!("Collected {} override files from {}", sources.len(), root.display());

    Ok(sources)
}
