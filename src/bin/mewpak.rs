//! mewpak command-line binary

fn main() -> anyhow::Result<()> {
    mewpak::cli::run_cli()
}
