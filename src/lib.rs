//! # mewpak
//!
//! A toolkit for the Mewgenics `resources.gpak` archive, built for shipping
//! translation mods: extract the packed text resources, patch the archive
//! with translated replacements, and restore the pristine original.
//!
//! The GPAK format is a flat directory table (entry count, then
//! length-prefixed names with payload sizes, little-endian) followed by the
//! concatenated payloads in directory order. Replacements may change entry
//! sizes, so patching always rebuilds the whole archive; original bytes are
//! sourced from a one-time backup and the rebuilt file is swapped in
//! atomically.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mewpak::gpak::{self, GpakReader};
//! use mewpak::overrides::collect_overrides;
//!
//! // List the archive directory
//! let reader = GpakReader::open("resources.gpak")?;
//! println!("{} entries", reader.entries().len());
//!
//! // Patch with translated files from an override tree
//! let sources = collect_overrides("override".as_ref())?;
//! let outcome = gpak::patch_archive("resources.gpak".as_ref(), &sources, &|_, _, _| {})?;
//! println!("replaced {} entries", outcome.replaced);
//! # Ok::<(), mewpak::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `mewpak` command-line binary

pub mod error;
pub mod gpak;
pub mod installer;
pub mod overrides;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::gpak::{
        archive_status, extract_matching, extract_to_dir, is_text_resource, patch_archive,
        restore, ArchiveStatus, DirectoryEntry, GpakReader, PatchOutcome, PatchState,
        ReplacementSource, ARCHIVE_NAME,
    };
    pub use crate::installer::{
        find_game_dir, install_loose_folders, remove_loose_folders, FolderReport,
    };
    pub use crate::overrides::collect_overrides;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
