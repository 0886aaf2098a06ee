//! CLI command for archive patching

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{print_done, print_step, simple_bar, LOOKING_GLASS, PACKAGE};
use crate::error::Error;
use crate::gpak::patch_archive;
use crate::overrides::collect_overrides;

pub fn execute(archive: &Path, overrides_dir: &Path, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    print_step(
        1,
        2,
        LOOKING_GLASS,
        &format!("Collecting override files from {}...", overrides_dir.display()),
    );
    let sources = collect_overrides(overrides_dir)?;

    if sources.is_empty() {
        anyhow::bail!(
            "no files found in {}; run the translator first",
            overrides_dir.display()
        );
    }
    println!("  {} override files", sources.len());

    print_step(2, 2, PACKAGE, &format!("Rebuilding {}...", archive.display()));

    let pb = if quiet { None } else { Some(simple_bar(0, "Rebuilding")) };

    let result = patch_archive(archive, &sources, &|current, total, name| {
        if let Some(ref pb) = pb {
            if pb.length() != Some(total as u64) {
                pb.set_length(total as u64);
            }
            pb.set_position(current as u64);
            pb.set_message(name.to_string());
        }
    });

    if let Some(ref pb) = pb {
        pb.finish_and_clear();
    }

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(Error::NothingToPatch) => {
            println!("Nothing to patch: no override file matched an archive entry.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if !outcome.unmatched.is_empty() {
        println!("Warning: no archive entry matches:");
        for name in &outcome.unmatched {
            println!("  {name}");
        }
    }

    println!(
        "Patched {} of {} entries ({}).",
        outcome.replaced,
        outcome.entry_count,
        if outcome.state_before.is_pristine() {
            "backup created"
        } else {
            "reused existing backup"
        }
    );

    print_done(started.elapsed());
    Ok(())
}
