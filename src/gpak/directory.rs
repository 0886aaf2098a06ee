//! GPAK directory table (de)serialization
//!
//! The directory is a `u32` entry count followed by `count` records of
//! `u16` name length, raw UTF-8 name bytes, and `u32` payload size, all
//! little-endian. Payloads follow immediately after the table, concatenated
//! in directory order with no padding.

use std::io::{ErrorKind, Read};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};

/// One named, sized payload record in the directory table.
///
/// Entry order is load-bearing: payload offsets are the running sum of the
/// sizes of all preceding entries. Names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Archive-internal name, forward-slash separators.
    pub name: String,
    /// Payload length in bytes.
    pub size: u32,
}

impl DirectoryEntry {
    /// Create an entry.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// Read the directory table from the start of an archive stream.
///
/// Returns the entries in file order and the absolute offset where the data
/// section begins. The offset is computed from the raw on-disk name lengths,
/// so it stays correct even when a name contains malformed UTF-8 (malformed
/// sequences are replaced with U+FFFD rather than failing the read).
///
/// # Errors
///
/// Returns [`Error::MalformedArchive`] if the stream ends before the declared
/// entry count is fully read, and [`Error::Io`] for other read failures.
pub fn read_directory<R: Read>(reader: &mut R) -> Result<(Vec<DirectoryEntry>, u64)> {
    let count = reader
        .read_u32::<LittleEndian>()
        .map_err(|e| truncated(e, "entry count"))?;

    let mut entries = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
    let mut data_start = 4u64;

    for index in 0..count {
        let name_len = reader
            .read_u16::<LittleEndian>()
            .map_err(|e| truncated_entry(e, index, count, "name length"))?;

        let mut name_bytes = vec![0u8; usize::from(name_len)];
        reader
            .read_exact(&mut name_bytes)
            .map_err(|e| truncated_entry(e, index, count, "name bytes"))?;
        let name = String::from_utf8_lossy(&name_bytes).into_owned();

        let size = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| truncated_entry(e, index, count, "size"))?;

        data_start += 2 + u64::from(name_len) + 4;
        entries.push(DirectoryEntry { name, size });
    }

    Ok((entries, data_start))
}

/// Encode a directory table into its exact binary layout.
///
/// Left inverse of [`read_directory`] for the directory portion: decoding the
/// returned bytes yields the same entries, and the reported data-section
/// offset equals the returned length.
///
/// # Errors
///
/// Returns [`Error::NameTooLong`] if a name exceeds the 16-bit length field
/// and [`Error::TooManyEntries`] if the count exceeds the 32-bit count field.
pub fn encode_directory(entries: &[DirectoryEntry]) -> Result<Vec<u8>> {
    let count: u32 = entries
        .len()
        .try_into()
        .map_err(|_| Error::TooManyEntries {
            count: entries.len(),
        })?;

    let mut buf = Vec::with_capacity(encoded_len(entries) as usize);
    buf.write_u32::<LittleEndian>(count)?;

    for entry in entries {
        let name_bytes = entry.name.as_bytes();
        let name_len: u16 = name_bytes.len().try_into().map_err(|_| Error::NameTooLong {
            name: entry.name.clone(),
        })?;

        buf.write_u16::<LittleEndian>(name_len)?;
        buf.extend_from_slice(name_bytes);
        buf.write_u32::<LittleEndian>(entry.size)?;
    }

    Ok(buf)
}

/// Byte length of the encoded directory table for `entries`.
#[must_use]
pub fn encoded_len(entries: &[DirectoryEntry]) -> u64 {
    4 + entries
        .iter()
        .map(|e| 2 + e.name.len() as u64 + 4)
        .sum::<u64>()
}

/// Total payload bytes declared by `entries`.
#[must_use]
pub fn payload_len(entries: &[DirectoryEntry]) -> u64 {
    entries.iter().map(|e| u64::from(e.size)).sum()
}

fn truncated(err: std::io::Error, what: &str) -> Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        Error::MalformedArchive {
            detail: format!("stream ends while reading {what}"),
        }
    } else {
        Error::Io(err)
    }
}

fn truncated_entry(err: std::io::Error, index: u32, count: u32, what: &str) -> Error {
    if err.kind() == ErrorKind::UnexpectedEof {
        Error::MalformedArchive {
            detail: format!("directory ends at entry {index} of {count} while reading {what}"),
        }
    } else {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_entries() -> Vec<DirectoryEntry> {
        vec![
            DirectoryEntry::new("data/text/items.csv", 10),
            DirectoryEntry::new("b.gon", 20),
            DirectoryEntry::new("c.dat", 5),
        ]
    }

    #[test]
    fn test_round_trip() {
        let entries = sample_entries();
        let encoded = encode_directory(&entries).unwrap();
        let (decoded, data_start) = read_directory(&mut Cursor::new(&encoded)).unwrap();

        assert_eq!(decoded, entries);
        assert_eq!(data_start, encoded.len() as u64);
        assert_eq!(data_start, encoded_len(&entries));
    }

    #[test]
    fn test_empty_directory() {
        let encoded = encode_directory(&[]).unwrap();
        assert_eq!(encoded, vec![0, 0, 0, 0]);

        let (decoded, data_start) = read_directory(&mut Cursor::new(&encoded)).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(data_start, 4);
    }

    #[test]
    fn test_exact_byte_layout() {
        let encoded = encode_directory(&[DirectoryEntry::new("ab", 0x0102_0304)]).unwrap();
        assert_eq!(
            encoded,
            vec![
                1, 0, 0, 0, // count
                2, 0, // name length
                b'a', b'b', // name
                0x04, 0x03, 0x02, 0x01, // size, little-endian
            ]
        );
    }

    #[test]
    fn test_truncated_directory_fails() {
        let encoded = encode_directory(&sample_entries()).unwrap();

        // Chop the table at every possible point; all of them must report a
        // malformed archive, not a bare IO error.
        for cut in 0..encoded.len() {
            let err = read_directory(&mut Cursor::new(&encoded[..cut])).unwrap_err();
            assert!(
                matches!(err, Error::MalformedArchive { .. }),
                "cut at {cut} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_count_larger_than_stream_fails() {
        // Declares 1000 entries but holds only one.
        let mut bytes = encode_directory(&[DirectoryEntry::new("x", 4)]).unwrap();
        bytes[0] = 0xE8;
        bytes[1] = 0x03;

        let err = read_directory(&mut Cursor::new(&bytes)).unwrap_err();
        assert!(matches!(err, Error::MalformedArchive { .. }));
    }

    #[test]
    fn test_malformed_name_is_replaced_not_fatal() {
        // name length 2, bytes [0xFF, 0x61]: invalid UTF-8 then 'a'
        let bytes = vec![
            1, 0, 0, 0, // count
            2, 0, // name length
            0xFF, b'a', // name bytes
            7, 0, 0, 0, // size
        ];

        let (entries, data_start) = read_directory(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(entries[0].name, "\u{FFFD}a");
        assert_eq!(entries[0].size, 7);
        // data_start reflects the on-disk length, not the replaced string.
        assert_eq!(data_start, bytes.len() as u64);
    }

    #[test]
    fn test_name_too_long_rejected() {
        let entry = DirectoryEntry::new("n".repeat(usize::from(u16::MAX) + 1), 0);
        let err = encode_directory(&[entry]).unwrap_err();
        assert!(matches!(err, Error::NameTooLong { .. }));
    }

    #[test]
    fn test_payload_len() {
        assert_eq!(payload_len(&sample_entries()), 35);
        assert_eq!(payload_len(&[]), 0);
    }
}
