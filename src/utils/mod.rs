//! Utility functions

pub mod path;

pub use path::{archive_name_to_relative, normalize_separators, relative_name};
