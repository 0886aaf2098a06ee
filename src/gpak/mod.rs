//! GPAK archive engine
//!
//! Directory codec, selective extraction, and rebuild with name-keyed
//! replacements. The archive format is a `u32` entry count, a table of
//! length-prefixed names with `u32` payload sizes, then the concatenated
//! payloads in directory order.

pub mod backup;
pub mod directory;
pub mod extract;
pub mod reader;
pub mod rebuild;
pub mod status;

pub use backup::{backup_path, ensure_backup, patch_state, restore, PatchState, BACKUP_SUFFIX};
pub use directory::{encode_directory, encoded_len, payload_len, read_directory, DirectoryEntry};
pub use extract::{
    extract_matching, extract_to_dir, is_text_resource, ExtractSummary, ExtractedEntry,
    GpakContents, TEXT_EXTENSIONS,
};
pub use reader::GpakReader;
pub use rebuild::{
    patch_archive, plan, rebuild, PatchOutcome, PatchPlan, ReplacementSource, COPY_CHUNK,
};
pub use status::{archive_status, ArchiveStatus};

/// Progress callback type: `(current, total, current item)`.
pub type ProgressCallback<'a> = &'a dyn Fn(usize, usize, &str);

/// Default archive file name next to the game executable.
pub const ARCHIVE_NAME: &str = "resources.gpak";
