//! Archive rebuild with named replacements
//!
//! A patch never rewrites the live archive in place. Original bytes come
//! from the backup, replacement bytes from override files; both are streamed
//! in bounded chunks into a temporary file that is atomically renamed over
//! the live archive only after the full stream is written and flushed.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

use super::backup::{ensure_backup, patch_state, PatchState};
use super::directory::{encode_directory, read_directory, DirectoryEntry};
use super::ProgressCallback;

/// Chunk size for payload copies. Entries can be arbitrarily large game
/// asset blobs; copying in bounded chunks keeps peak memory flat.
pub const COPY_CHUNK: usize = 8 * 1024 * 1024;

/// A named replacement payload backed by a file of known length.
#[derive(Debug, Clone)]
pub struct ReplacementSource {
    /// Archive-internal name this payload replaces, forward-slash separators.
    pub name: String,
    /// File holding the replacement bytes.
    pub path: PathBuf,
    /// Length of the replacement in bytes.
    pub len: u64,
}

impl ReplacementSource {
    /// Open the backing file for reading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened.
    pub fn open(&self) -> Result<File> {
        Ok(File::open(&self.path)?)
    }
}

/// Result of matching replacement sources against a directory table.
#[derive(Debug, Clone)]
pub struct PatchPlan {
    /// Declared size per entry after patching: the replacement length for
    /// matched entries, the original size for the rest.
    pub new_sizes: Vec<u32>,
    /// Matched `(entry index, source index)` pairs, in directory order.
    pub matched: Vec<(usize, usize)>,
    /// Source names with no corresponding directory entry. A warning for
    /// the caller, not a failure.
    pub unmatched: Vec<String>,
}

impl PatchPlan {
    /// Number of entries that will be replaced.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matched.len()
    }
}

/// Match replacement sources against directory entries by exact name.
///
/// Only the first directory occurrence of a duplicate name matches; later
/// duplicates keep their original payload. Sources whose name appears in no
/// entry are reported in the plan's `unmatched`.
///
/// # Errors
///
/// Returns [`Error::NothingToPatch`] if no source matched any entry (the
/// caller must not write a no-op archive), and
/// [`Error::ReplacementTooLarge`] if a matched source exceeds the 32-bit
/// size field.
pub fn plan(entries: &[DirectoryEntry], sources: &[ReplacementSource]) -> Result<PatchPlan> {
    // Name index is transient; entry order is what determines offsets.
    let mut by_name: HashMap<&str, usize> = HashMap::new();
    for (i, source) in sources.iter().enumerate() {
        by_name.entry(source.name.as_str()).or_insert(i);
    }

    let mut new_sizes = Vec::with_capacity(entries.len());
    let mut matched = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if let Some(source_index) = by_name.remove(entry.name.as_str()) {
            let source = &sources[source_index];
            let size: u32 = source.len.try_into().map_err(|_| Error::ReplacementTooLarge {
                name: source.name.clone(),
                len: source.len,
            })?;
            matched.push((index, source_index));
            new_sizes.push(size);
        } else {
            new_sizes.push(entry.size);
        }
    }

    if matched.is_empty() {
        return Err(Error::NothingToPatch);
    }

    let matched_sources: Vec<bool> = {
        let mut seen = vec![false; sources.len()];
        for &(_, source_index) in &matched {
            seen[source_index] = true;
        }
        seen
    };
    let unmatched = sources
        .iter()
        .enumerate()
        .filter(|(i, _)| !matched_sources[*i])
        .map(|(_, s)| s.name.clone())
        .collect();

    Ok(PatchPlan {
        new_sizes,
        matched,
        unmatched,
    })
}

/// Stream a rebuilt archive into `out`.
///
/// Emits the directory encoded with the plan's updated sizes, then each
/// payload in directory order: the full replacement for matched entries,
/// otherwise exactly `original_size` bytes seeked from `source` at the
/// entry's original offset (cumulative original sizes from `data_start`).
///
/// `out` must not be the live archive; publication is the caller's job.
///
/// # Errors
///
/// Returns [`Error::MalformedArchive`] if the source data section is shorter
/// than the directory declares, and [`Error::Io`] for other failures.
pub fn rebuild<R, W>(
    source: &mut R,
    entries: &[DirectoryEntry],
    data_start: u64,
    plan: &PatchPlan,
    sources: &[ReplacementSource],
    out: &mut W,
    progress: ProgressCallback,
) -> Result<()>
where
    R: Read + Seek,
    W: Write,
{
    let updated: Vec<DirectoryEntry> = entries
        .iter()
        .zip(&plan.new_sizes)
        .map(|(entry, &size)| DirectoryEntry::new(entry.name.clone(), size))
        .collect();
    out.write_all(&encode_directory(&updated)?)?;

    let replacement_for: HashMap<usize, usize> = plan.matched.iter().copied().collect();

    let mut offset = data_start;
    let total = entries.len();

    for (index, entry) in entries.iter().enumerate() {
        progress(index + 1, total, &entry.name);

        if let Some(&source_index) = replacement_for.get(&index) {
            let replacement = &sources[source_index];
            let mut file = replacement.open()?;
            copy_exact(&mut file, out, replacement.len)
                .map_err(|e| short_replacement(e, replacement))?;
        } else {
            source.seek(SeekFrom::Start(offset))?;
            copy_exact(source, out, u64::from(entry.size))
                .map_err(|e| short_payload(e, &entry.name))?;
        }

        // Source offsets advance by the *original* size either way.
        offset += u64::from(entry.size);
    }

    Ok(())
}

/// Copy exactly `len` bytes from `reader` to `writer` in bounded chunks.
///
/// # Errors
///
/// Returns [`Error::Io`] with [`ErrorKind::UnexpectedEof`] if the reader
/// ends early; no partial chunk is dropped or duplicated at boundaries.
pub(crate) fn copy_exact<R, W>(reader: &mut R, writer: &mut W, len: u64) -> Result<()>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let cap = usize::try_from(len.min(COPY_CHUNK as u64)).unwrap_or(COPY_CHUNK);
    let mut buf = vec![0u8; cap.max(1)];
    let mut remaining = len;

    while remaining > 0 {
        let take = usize::try_from(remaining.min(buf.len() as u64)).unwrap_or(buf.len());
        let chunk = &mut buf[..take];
        reader.read_exact(chunk)?;
        writer.write_all(chunk)?;
        remaining -= take as u64;
    }

    Ok(())
}

fn short_payload(err: Error, name: &str) -> Error {
    match err {
        Error::Io(io) if io.kind() == ErrorKind::UnexpectedEof => Error::MalformedArchive {
            detail: format!("data section ends inside payload for {name}"),
        },
        other => other,
    }
}

fn short_replacement(err: Error, source: &ReplacementSource) -> Error {
    match err {
        Error::Io(io) if io.kind() == ErrorKind::UnexpectedEof => Error::Io(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            format!(
                "replacement file {} is shorter than its recorded length of {} bytes",
                source.path.display(),
                source.len
            ),
        )),
        other => other,
    }
}

/// Outcome of a completed patch run.
#[derive(Debug)]
pub struct PatchOutcome {
    /// Number of entries replaced.
    pub replaced: usize,
    /// Source names that matched no directory entry.
    pub unmatched: Vec<String>,
    /// Archive state before this run.
    pub state_before: PatchState,
    /// Total entries in the archive directory.
    pub entry_count: usize,
}

/// Patch `archive` with `sources`, publishing atomically.
///
/// Runs the full state machine: ensure the backup (first patch only), read
/// the directory from the backup, plan matches, stream the rebuild into a
/// temporary file beside the archive, then rename it over the live archive.
/// Any failure before that final rename leaves the live archive untouched
/// and the temporary file discarded.
///
/// # Errors
///
/// Returns [`Error::NothingToPatch`] when no source matches,
/// [`Error::MalformedArchive`] for a bad directory or truncated data
/// section, and [`Error::Io`] for read/write/seek failures.
pub fn patch_archive(
    archive: &Path,
    sources: &[ReplacementSource],
    progress: ProgressCallback,
) -> Result<PatchOutcome> {
    let state_before = patch_state(archive);
    let backup = ensure_backup(archive)?;

    let mut source = BufReader::new(File::open(&backup)?);
    let (entries, data_start) = read_directory(&mut source)?;

    let plan = plan(&entries, sources)?;
    for name in &plan.unmatched {
        tracing::warn!("No archive entry matches override {name}");
    }
    tracing::info!(
        "Rebuilding {} ({} of {} entries replaced)",
        archive.display(),
        plan.match_count(),
        entries.len()
    );

    let parent = archive.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = NamedTempFile::new_in(parent.unwrap_or_else(|| Path::new(".")))?;

    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        rebuild(
            &mut source,
            &entries,
            data_start,
            &plan,
            sources,
            &mut out,
            progress,
        )?;
        out.flush()?;
    }

    tmp.as_file().sync_all()?;
    tmp.persist(archive).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Published {}", archive.display());

    Ok(PatchOutcome {
        replaced: plan.match_count(),
        unmatched: plan.unmatched,
        state_before,
        entry_count: entries.len(),
    })
}
