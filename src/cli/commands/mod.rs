use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::gpak::ARCHIVE_NAME;
use crate::installer::{find_game_dir, looks_like_game_dir};

pub mod extract;
pub mod install;
pub mod list;
pub mod patch;
pub mod restore;
pub mod status;

#[derive(Subcommand)]
pub enum Commands {
    /// Extract text resources from the archive
    ExtractText {
        /// Archive file (auto-detected if not specified)
        #[arg(short, long)]
        archive: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "text_output")]
        output: PathBuf,

        /// Extract every entry, not just text resources
        #[arg(long)]
        all: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// List archive directory entries
    List {
        /// Archive file (auto-detected if not specified)
        #[arg(short, long)]
        archive: Option<PathBuf>,

        /// Show sizes and payload offsets
        #[arg(short, long)]
        detailed: bool,

        /// Only list entries matching glob pattern (e.g., "*.gon")
        #[arg(long)]
        filter: Option<String>,

        /// Only show count of matching entries
        #[arg(short, long)]
        count: bool,
    },

    /// Show archive totals and patch state
    Status {
        /// Archive file (auto-detected if not specified)
        #[arg(short, long)]
        archive: Option<PathBuf>,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Patch the archive with files from an override directory
    Patch {
        /// Archive file (auto-detected if not specified)
        #[arg(short, long)]
        archive: Option<PathBuf>,

        /// Directory of replacement files, relative paths matching entry names
        #[arg(short, long, default_value = "override")]
        overrides: PathBuf,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Restore the pristine archive from its backup
    Restore {
        /// Archive file (auto-detected if not specified)
        #[arg(short, long)]
        archive: Option<PathBuf>,
    },

    /// Copy loose translation folders into the game directory
    Install {
        /// Directory holding the translation's data/ and swfs/ folders
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Game directory (auto-detected if not specified)
        #[arg(long)]
        game_dir: Option<PathBuf>,
    },

    /// Remove loose translation folders from the game directory
    Uninstall {
        /// Game directory (auto-detected if not specified)
        #[arg(long)]
        game_dir: Option<PathBuf>,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::ExtractText {
                archive,
                output,
                all,
                quiet,
            } => extract::execute(&resolve_archive(archive.as_deref())?, output, *all, *quiet),
            Commands::List {
                archive,
                detailed,
                filter,
                count,
            } => list::execute(
                &resolve_archive(archive.as_deref())?,
                *detailed,
                filter.as_deref(),
                *count,
            ),
            Commands::Status { archive, json } => {
                status::execute(&resolve_archive(archive.as_deref())?, *json)
            }
            Commands::Patch {
                archive,
                overrides,
                quiet,
            } => patch::execute(
                &resolve_archive(archive.as_deref())?,
                &expand_path(overrides),
                *quiet,
            ),
            Commands::Restore { archive } => {
                restore::execute(&resolve_archive(archive.as_deref())?)
            }
            Commands::Install { source, game_dir } => {
                install::install(&expand_path(source), &resolve_game_dir(game_dir.as_deref())?)
            }
            Commands::Uninstall { game_dir } => {
                install::uninstall(&resolve_game_dir(game_dir.as_deref())?)
            }
        }
    }
}

/// Expand a leading tilde in a user-entered path.
fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Resolve the archive to operate on: explicit flag, current directory,
/// then the auto-detected game installation.
fn resolve_archive(archive: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = archive {
        let path = expand_path(path);
        anyhow::ensure!(path.is_file(), "archive not found: {}", path.display());
        return Ok(path);
    }

    let local = PathBuf::from(ARCHIVE_NAME);
    if local.is_file() {
        return Ok(local);
    }

    if let Some(game_dir) = find_game_dir() {
        let candidate = game_dir.join(ARCHIVE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    anyhow::bail!("could not find {ARCHIVE_NAME}; pass --archive <path>")
}

/// Resolve the game directory: explicit flag or auto-detection.
fn resolve_game_dir(game_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = game_dir {
        let path = expand_path(path);
        anyhow::ensure!(
            looks_like_game_dir(&path),
            "{} does not look like a Mewgenics install (no game executable or {ARCHIVE_NAME})",
            path.display()
        );
        return Ok(path);
    }

    find_game_dir()
        .ok_or_else(|| anyhow::anyhow!("game installation not found; pass --game-dir <path>"))
}
