//! GPAK archive reader

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};

use super::directory::{read_directory, DirectoryEntry};

/// Reader over a GPAK archive stream.
///
/// The directory table is parsed eagerly on construction; payloads are read
/// on demand by seeking to their computed offsets. The archive is never
/// written through this type.
pub struct GpakReader<R: Read + Seek> {
    reader: BufReader<R>,
    entries: Vec<DirectoryEntry>,
    offsets: Vec<u64>,
    data_start: u64,
}

impl GpakReader<File> {
    /// Open an archive file and parse its directory table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened and
    /// [`Error::MalformedArchive`] if the directory is truncated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> GpakReader<R> {
    /// Create a reader from a seekable stream positioned at the archive start.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedArchive`] if the directory is truncated.
    pub fn new(inner: R) -> Result<Self> {
        let mut reader = BufReader::new(inner);
        let (entries, data_start) = read_directory(&mut reader)?;

        // Offset of entry i = data_start + sum of sizes of entries 0..i.
        let mut offsets = Vec::with_capacity(entries.len());
        let mut offset = data_start;
        for entry in &entries {
            offsets.push(offset);
            offset += u64::from(entry.size);
        }

        Ok(Self {
            reader,
            entries,
            offsets,
            data_start,
        })
    }

    /// Directory entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Absolute offset where the data section begins.
    #[must_use]
    pub fn data_start(&self) -> u64 {
        self.data_start
    }

    /// Absolute payload offset of the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn entry_offset(&self, index: usize) -> u64 {
        self.offsets[index]
    }

    /// Read the full payload of the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedArchive`] if the data section ends before
    /// the entry's declared size, and [`Error::Io`] for other read failures.
    pub fn read_entry(&mut self, index: usize) -> Result<Vec<u8>> {
        let entry = &self.entries[index];
        let offset = self.offsets[index];

        self.reader.seek(SeekFrom::Start(offset))?;

        let mut data = vec![0u8; entry.size as usize];
        self.reader.read_exact(&mut data).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                Error::MalformedArchive {
                    detail: format!(
                        "payload for {} is truncated (declared {} bytes at offset {offset})",
                        entry.name, entry.size
                    ),
                }
            } else {
                Error::Io(e)
            }
        })?;

        Ok(data)
    }
}
