//! CLI commands for loose folder install/uninstall

use std::path::Path;

use crate::installer::{install_loose_folders, remove_loose_folders, FolderReport, LOOSE_FOLDERS};

pub fn install(source: &Path, game_dir: &Path) -> anyhow::Result<()> {
    println!("Installing into {}", game_dir.display());

    let report = install_loose_folders(source, game_dir)?;
    print_report(&report, "installed");

    if report.processed.is_empty() {
        anyhow::bail!(
            "none of {:?} found in {}; unpack the translation archive fully first",
            LOOSE_FOLDERS,
            source.display()
        );
    }

    println!("Install complete. Launch the game through Steam.");
    Ok(())
}

pub fn uninstall(game_dir: &Path) -> anyhow::Result<()> {
    println!("Removing translation folders from {}", game_dir.display());

    let report = remove_loose_folders(game_dir)?;
    print_report(&report, "removed");

    if report.processed.is_empty() {
        println!("Nothing to remove; the translation folders are already gone.");
    } else {
        println!("Uninstall complete. The game will use its packed originals.");
    }
    Ok(())
}

fn print_report(report: &FolderReport, verb: &str) {
    for (folder, files) in &report.processed {
        println!("  {folder}/ {verb} ({files} files)");
    }
    for folder in &report.skipped {
        println!("  {folder}/ not present, skipped");
    }
}
