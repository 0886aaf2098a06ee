//! CLI command for listing archive contents

use std::path::Path;

use crate::gpak::GpakReader;

use super::status::format_size;

pub fn execute(
    archive: &Path,
    detailed: bool,
    filter: Option<&str>,
    count_only: bool,
) -> anyhow::Result<()> {
    let reader = GpakReader::open(archive)?;

    let matching: Vec<usize> = (0..reader.entries().len())
        .filter(|&i| {
            filter.is_none_or(|pattern| matches_glob(pattern, &reader.entries()[i].name))
        })
        .collect();

    if count_only {
        println!("{}", matching.len());
        return Ok(());
    }

    for index in &matching {
        let entry = &reader.entries()[*index];
        if detailed {
            println!(
                "{:>10}  {:>12}  {}",
                format_size(u64::from(entry.size)),
                reader.entry_offset(*index),
                entry.name
            );
        } else {
            println!("{}", entry.name);
        }
    }

    if detailed {
        println!();
        println!("{} entries", matching.len());
    }

    Ok(())
}

/// Simple glob pattern matching (supports * and ?)
fn matches_glob(pattern: &str, text: &str) -> bool {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let text_chars: Vec<char> = text.chars().collect();
    matches_glob_recursive(&pattern_chars, &text_chars, 0, 0)
}

fn matches_glob_recursive(pattern: &[char], text: &[char], pi: usize, ti: usize) -> bool {
    if pi == pattern.len() && ti == text.len() {
        return true;
    }
    if pi == pattern.len() {
        return false;
    }

    match pattern[pi] {
        '*' => {
            // Try matching zero or more characters
            for i in ti..=text.len() {
                if matches_glob_recursive(pattern, text, pi + 1, i) {
                    return true;
                }
            }
            false
        }
        '?' => {
            // Match exactly one character
            if ti < text.len() {
                matches_glob_recursive(pattern, text, pi + 1, ti + 1)
            } else {
                false
            }
        }
        c => {
            // Match literal character (case-insensitive for paths)
            if ti < text.len() && text[ti].eq_ignore_ascii_case(&c) {
                matches_glob_recursive(pattern, text, pi + 1, ti + 1)
            } else {
                false
            }
        }
    }
}
