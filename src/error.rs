//! Error types for `mewpak`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `mewpak` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== GPAK Archive Errors ====================
    /// The directory table is truncated or internally inconsistent.
    #[error("malformed archive: {detail}")]
    MalformedArchive {
        /// Description of what is inconsistent.
        detail: String,
    },

    /// An entry name does not fit the directory's 16-bit length field.
    #[error("entry name too long for directory table: {name}")]
    NameTooLong {
        /// The offending entry name.
        name: String,
    },

    /// The entry count does not fit the directory's 32-bit count field.
    #[error("too many entries for directory table: {count}")]
    TooManyEntries {
        /// The number of entries requested.
        count: usize,
    },

    // ==================== Patch Errors ====================
    /// No override matched any directory entry; nothing was written.
    #[error("no override file matched an archive entry")]
    NothingToPatch,

    /// A replacement payload does not fit the directory's 32-bit size field.
    #[error("replacement for {name} is too large: {len} bytes")]
    ReplacementTooLarge {
        /// The entry name the replacement targets.
        name: String,
        /// The replacement's length in bytes.
        len: u64,
    },

    /// A restore was requested but no backup exists.
    #[error("no backup found at {path}")]
    MissingBackup {
        /// The expected backup path.
        path: PathBuf,
    },

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    // ==================== Serialization Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `mewpak` operations.
pub type Result<T> = std::result::Result<T, Error>;
