//! Path utilities
//!
//! Archive-internal names always use forward-slash separators; these helpers
//! are the single place where they meet host paths.

use std::path::{Component, Path, PathBuf};

/// Normalize path separators to forward slashes (for archive names).
pub fn normalize_separators<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Get the path of `path` relative to `base`, separator-normalized.
pub fn relative_name<P: AsRef<Path>>(path: P, base: P) -> Option<String> {
    path.as_ref()
        .strip_prefix(base.as_ref())
        .ok()
        .map(normalize_separators)
}

/// Map an archive-internal name to a safe relative host path.
///
/// Splits on forward slashes and rebuilds the path from normal components
/// only. Returns `None` for names that would escape the destination root
/// (absolute paths, `..` components) or that contain no usable component.
#[must_use]
pub fn archive_name_to_relative(name: &str) -> Option<PathBuf> {
    let mut out = PathBuf::new();

    for part in name.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        match Path::new(part).components().next() {
            Some(Component::Normal(_)) => out.push(part),
            _ => return None,
        }
    }

    if out.as_os_str().is_empty() {
        None
    } else {
        Some(out)
    }
}
