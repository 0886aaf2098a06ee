//! CLI command for archive status

use std::path::Path;

use crate::gpak::archive_status;

pub fn execute(archive: &Path, json: bool) -> anyhow::Result<()> {
    let status = archive_status(archive)?;

    if json {
        println!("{}", status.to_json()?);
        return Ok(());
    }

    println!("Archive: {}", status.archive);
    println!("State: {}", status.state);
    if let Some(ref when) = status.backed_up_at {
        println!("Backed up: {when}");
    }
    println!();
    println!("Entries: {}", status.entry_count);
    println!("Text entries: {}", status.text_entry_count);
    println!(
        "Directory: {} ({} bytes)",
        format_size(status.directory_bytes),
        status.directory_bytes
    );
    println!(
        "Payloads: {} ({} bytes)",
        format_size(status.payload_bytes),
        status.payload_bytes
    );

    Ok(())
}

/// Format byte size for display
pub(super) fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
