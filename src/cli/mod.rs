//! mewpak CLI - command-line interface for the GPAK toolkit

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "mewpak")]
#[command(version)]
#[command(about = "GPAK archive toolkit for Mewgenics translation mods", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the mewpak CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
