//! Game installation discovery
//!
//! Probes well-known Steam roots, then every library listed in
//! `steamapps/libraryfolders.vdf`, for a Mewgenics folder that actually
//! holds the game. Manual path entry is the CLI-level fallback.

use std::fs;
use std::path::{Path, PathBuf};

use crate::gpak::ARCHIVE_NAME;

/// Name of the game executable used to recognize an install directory.
pub const GAME_EXE: &str = "Mewgenics.exe";

const GAME_FOLDER: &str = "Mewgenics";

/// Find the Mewgenics installation directory, if any Steam library holds it.
#[must_use]
pub fn find_game_dir() -> Option<PathBuf> {
    for root in steam_roots() {
        for library in library_dirs(&root) {
            let candidate = library.join("steamapps").join("common").join(GAME_FOLDER);
            if looks_like_game_dir(&candidate) {
                tracing::info!("Found game at {}", candidate.display());
                return Some(candidate);
            }
        }
    }
    None
}

/// Whether `dir` holds the game executable or its resource archive.
#[must_use]
pub fn looks_like_game_dir(dir: &Path) -> bool {
    dir.join(GAME_EXE).is_file() || dir.join(ARCHIVE_NAME).is_file()
}

/// Well-known Steam installation roots for the current platform.
fn steam_roots() -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();

    #[cfg(target_os = "windows")]
    {
        for var in ["ProgramFiles(x86)", "ProgramFiles"] {
            if let Ok(programs) = std::env::var(var) {
                roots.push(PathBuf::from(programs).join("Steam"));
            }
        }
        for drive in ["C", "D", "E"] {
            roots.push(PathBuf::from(format!("{drive}:\\Steam")));
            roots.push(PathBuf::from(format!("{drive}:\\SteamLibrary")));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            roots.push(home.join("Library/Application Support/Steam"));
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = dirs::home_dir() {
            roots.push(home.join(".steam/steam"));
            roots.push(home.join(".local/share/Steam"));
            roots.push(home.join(".var/app/com.valvesoftware.Steam/.local/share/Steam"));
        }
    }

    roots.retain(|p| p.is_dir());
    roots
}

/// The Steam root itself plus every library listed in its vdf manifest.
fn library_dirs(root: &Path) -> Vec<PathBuf> {
    let mut libraries = vec![root.to_path_buf()];

    let vdf = root.join("steamapps").join("libraryfolders.vdf");
    if let Ok(content) = fs::read_to_string(&vdf) {
        for path in library_paths_from_vdf(&content) {
            if path.is_dir() && !libraries.contains(&path) {
                libraries.push(path);
            }
        }
    }

    libraries
}

/// Pull `"path"` values out of a `libraryfolders.vdf` document.
///
/// The vdf format is a nested key/value tree; library locations appear as
/// lines of the form `"path"  "D:\\SteamLibrary"`. Escaped backslashes are
/// unescaped.
fn library_paths_from_vdf(content: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for line in content.lines() {
        let mut quoted = line.split('"').skip(1).step_by(2);
        let (Some(key), Some(value)) = (quoted.next(), quoted.next()) else {
            continue;
        };
        if key.eq_ignore_ascii_case("path") && !value.is_empty() {
            paths.push(PathBuf::from(value.replace("\\\\", "\\")));
        }
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vdf_path_extraction() {
        let vdf = r#"
"libraryfolders"
{
	"0"
	{
		"path"		"C:\\Program Files (x86)\\Steam"
		"label"		""
	}
	"1"
	{
		"path"		"D:\\SteamLibrary"
		"apps"
		{
			"123456"		"789"
		}
	}
}
"#;
        let paths = library_paths_from_vdf(vdf);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("C:\\Program Files (x86)\\Steam"),
                PathBuf::from("D:\\SteamLibrary"),
            ]
        );
    }

    #[test]
    fn test_vdf_ignores_non_path_keys_and_blank_values() {
        let vdf = "\"label\" \"path\"\n\"path\" \"\"\n";
        assert!(library_paths_from_vdf(vdf).is_empty());
    }

    #[test]
    fn test_looks_like_game_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!looks_like_game_dir(dir.path()));

        std::fs::write(dir.path().join(ARCHIVE_NAME), b"").unwrap();
        assert!(looks_like_game_dir(dir.path()));
    }
}
