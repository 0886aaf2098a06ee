//! Selective extraction from GPAK archives
//!
//! Extraction is best-effort: a failed entry is recorded and skipped, the
//! remaining entries still extract. Offset bookkeeping always advances by
//! the declared size whether or not an entry is read.

use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::utils::path::archive_name_to_relative;

use super::reader::GpakReader;
use super::ProgressCallback;

/// File extensions the stock tooling treats as translatable text resources.
pub const TEXT_EXTENSIONS: [&str; 5] = ["gon", "csv", "txt", "ini", "data"];

/// Whether an archive name carries one of the known text extensions.
#[must_use]
pub fn is_text_resource(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    TEXT_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}

/// One payload pulled out of the archive.
#[derive(Debug, Clone)]
pub struct ExtractedEntry {
    /// Archive-internal name, forward-slash separators.
    pub name: String,
    /// Payload bytes.
    pub data: Vec<u8>,
}

/// Result of reading selected entries, with support for partial success.
#[derive(Debug, Default)]
pub struct GpakContents {
    /// Successfully read entries, in directory order.
    pub files: Vec<ExtractedEntry>,
    /// Entries that failed to read (name, error message).
    pub errors: Vec<(String, String)>,
}

impl GpakContents {
    /// Returns true if every selected entry was read successfully.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Summary of an extraction to disk.
#[derive(Debug, Default)]
pub struct ExtractSummary {
    /// Number of files written.
    pub written: usize,
    /// Total payload bytes written.
    pub bytes: u64,
    /// Entries that failed to read or write (name, error message).
    pub errors: Vec<(String, String)>,
}

/// Read every entry whose name satisfies `predicate` into memory.
///
/// Entries that fail to read are recorded in the result's `errors` and do
/// not abort the remaining entries.
pub fn extract_matching<R, F>(reader: &mut GpakReader<R>, predicate: F) -> GpakContents
where
    R: Read + Seek,
    F: Fn(&str) -> bool,
{
    let selected: Vec<usize> = (0..reader.entries().len())
        .filter(|&i| predicate(&reader.entries()[i].name))
        .collect();

    let mut contents = GpakContents::default();
    for index in selected {
        let name = reader.entries()[index].name.clone();
        match reader.read_entry(index) {
            Ok(data) => contents.files.push(ExtractedEntry { name, data }),
            Err(e) => contents.errors.push((name, e.to_string())),
        }
    }

    contents
}

/// Extract every entry whose name satisfies `predicate` into `dest`.
///
/// Archive-internal forward slashes become host directory structure;
/// intermediate directories are created as needed. Names that would escape
/// `dest` are recorded as errors and skipped.
///
/// # Errors
///
/// Returns [`Error::Io`] only if the destination root cannot be created;
/// per-entry failures are collected in the summary.
///
/// [`Error::Io`]: crate::Error::Io
pub fn extract_to_dir<R, F>(
    reader: &mut GpakReader<R>,
    predicate: F,
    dest: &Path,
    progress: ProgressCallback,
) -> Result<ExtractSummary>
where
    R: Read + Seek,
    F: Fn(&str) -> bool,
{
    fs::create_dir_all(dest)?;

    let selected: Vec<usize> = (0..reader.entries().len())
        .filter(|&i| predicate(&reader.entries()[i].name))
        .collect();
    let total = selected.len();

    tracing::info!(
        "Extracting {total} of {} entries to {}",
        reader.entries().len(),
        dest.display()
    );

    let mut summary = ExtractSummary::default();
    for (done, index) in selected.into_iter().enumerate() {
        let name = reader.entries()[index].name.clone();
        progress(done + 1, total, &name);

        match extract_one(reader, index, dest) {
            Ok(written) => {
                summary.written += 1;
                summary.bytes += written;
            }
            Err(e) => summary.errors.push((name, e.to_string())),
        }
    }

    Ok(summary)
}

fn extract_one<R: Read + Seek>(
    reader: &mut GpakReader<R>,
    index: usize,
    dest: &Path,
) -> Result<u64> {
    let name = &reader.entries()[index].name;
    let relative = archive_name_to_relative(name)
        .ok_or_else(|| crate::error::Error::InvalidPath(name.clone()))?;

    let out_path: PathBuf = dest.join(relative);
    let data = reader.read_entry(index)?;

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out_path, &data)?;

    Ok(data.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpak::directory::{encode_directory, DirectoryEntry};
    use std::io::Cursor;

    fn build_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let dir: Vec<DirectoryEntry> = entries
            .iter()
            .map(|(name, data)| DirectoryEntry::new(*name, data.len() as u32))
            .collect();
        let mut bytes = encode_directory(&dir).unwrap();
        for (_, data) in entries {
            bytes.extend_from_slice(data);
        }
        bytes
    }

    #[test]
    fn test_is_text_resource() {
        assert!(is_text_resource("data/text/items.csv"));
        assert!(is_text_resource("ui/menu.GON"));
        assert!(is_text_resource("config.ini"));
        assert!(is_text_resource("tables/stats.data"));
        assert!(!is_text_resource("sprites/cat.png"));
        assert!(!is_text_resource("noextension"));
    }

    #[test]
    fn test_extract_matching_filters_and_keeps_order() {
        let bytes = build_archive(&[
            ("a.csv", b"aaaa"),
            ("skip.png", b"\x89PNG"),
            ("b/c.gon", b"gon"),
        ]);
        let mut reader = GpakReader::new(Cursor::new(bytes)).unwrap();

        let contents = extract_matching(&mut reader, is_text_resource);
        assert!(contents.is_complete());
        assert_eq!(contents.files.len(), 2);
        assert_eq!(contents.files[0].name, "a.csv");
        assert_eq!(contents.files[0].data, b"aaaa");
        assert_eq!(contents.files[1].name, "b/c.gon");
        assert_eq!(contents.files[1].data, b"gon");
    }

    #[test]
    fn test_skipped_entries_do_not_break_offsets() {
        // The middle entry is skipped by the predicate; the third entry must
        // still land at the correct offset past it.
        let bytes = build_archive(&[
            ("first.csv", b"11"),
            ("middle.bin", b"0123456789"),
            ("last.csv", b"22"),
        ]);
        let mut reader = GpakReader::new(Cursor::new(bytes)).unwrap();

        let contents = extract_matching(&mut reader, |n| n.ends_with(".csv"));
        assert_eq!(contents.files[1].data, b"22");
    }

    #[test]
    fn test_bad_entry_reported_rest_extracted() {
        // Truncate the final payload so the last entry fails but the first
        // still extracts.
        let mut bytes = build_archive(&[("good.csv", b"ok"), ("bad.csv", b"truncated")]);
        bytes.truncate(bytes.len() - 4);
        let mut reader = GpakReader::new(Cursor::new(bytes)).unwrap();

        let contents = extract_matching(&mut reader, |_| true);
        assert_eq!(contents.files.len(), 1);
        assert_eq!(contents.files[0].name, "good.csv");
        assert_eq!(contents.errors.len(), 1);
        assert_eq!(contents.errors[0].0, "bad.csv");
    }

    #[test]
    fn test_extract_to_dir_builds_tree() {
        let bytes = build_archive(&[("data/text/items.csv", b"KEY,en\n"), ("top.gon", b"{}")]);
        let mut reader = GpakReader::new(Cursor::new(bytes)).unwrap();

        let dest = tempfile::tempdir().unwrap();
        let summary =
            extract_to_dir(&mut reader, is_text_resource, dest.path(), &|_, _, _| {}).unwrap();

        assert_eq!(summary.written, 2);
        assert_eq!(summary.bytes, 9);
        assert!(summary.errors.is_empty());
        assert_eq!(
            std::fs::read(dest.path().join("data").join("text").join("items.csv")).unwrap(),
            b"KEY,en\n"
        );
        assert_eq!(std::fs::read(dest.path().join("top.gon")).unwrap(), b"{}");
    }

    #[test]
    fn test_escaping_name_is_error_not_write() {
        let bytes = build_archive(&[("../evil.csv", b"x")]);
        let mut reader = GpakReader::new(Cursor::new(bytes)).unwrap();

        let dest = tempfile::tempdir().unwrap();
        let summary = extract_to_dir(&mut reader, |_| true, dest.path(), &|_, _, _| {}).unwrap();

        assert_eq!(summary.written, 0);
        assert_eq!(summary.errors.len(), 1);
    }
}
