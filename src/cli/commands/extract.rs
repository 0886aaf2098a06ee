//! CLI command for text resource extraction

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{print_done, print_step, simple_bar, DISK, LOOKING_GLASS};
use crate::gpak::{extract_to_dir, is_text_resource, GpakReader};

pub fn execute(archive: &Path, output: &Path, all: bool, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    print_step(1, 2, LOOKING_GLASS, "Reading archive directory...");
    let mut reader = GpakReader::open(archive)?;

    let predicate = |name: &str| all || is_text_resource(name);
    let selected = reader
        .entries()
        .iter()
        .filter(|e| predicate(&e.name))
        .count();

    print_step(
        2,
        2,
        DISK,
        &format!("Extracting {selected} entries to {}...", output.display()),
    );

    let pb = if quiet {
        None
    } else {
        Some(simple_bar(selected as u64, "Extracting"))
    };

    let summary = extract_to_dir(&mut reader, predicate, output, &|current, _, name| {
        if let Some(ref pb) = pb {
            pb.set_position(current as u64);
            pb.set_message(name.to_string());
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    println!(
        "Extracted {} files ({} bytes) to {}",
        summary.written,
        summary.bytes,
        output.display()
    );

    if !summary.errors.is_empty() {
        println!();
        println!("{} entries failed:", summary.errors.len());
        for (name, message) in &summary.errors {
            println!("  {name}: {message}");
        }
    }

    print_done(started.elapsed());
    Ok(())
}
