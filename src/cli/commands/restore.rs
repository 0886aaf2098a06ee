//! CLI command for restoring the pristine archive

use std::path::Path;

use crate::error::Error;
use crate::gpak::restore;

pub fn execute(archive: &Path) -> anyhow::Result<()> {
    match restore(archive) {
        Ok(bytes) => {
            println!("Restored {} ({bytes} bytes) from backup.", archive.display());
            Ok(())
        }
        Err(Error::MissingBackup { path }) => {
            println!(
                "No backup found at {}; the archive has not been patched.",
                path.display()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
