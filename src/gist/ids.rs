//! Gist identifier extraction from user input

use crate::ConfigError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Host marking an input token as a gist URL
pub const GIST_HOST: &str = "gist.github.com";

/// Length of a raw gist identifier
pub const GIST_ID_LEN: usize = 32;

/// Line that terminates an identifier file
pub const END_MARKER: &str = "end";

/// Reduces a gist URL or raw identifier to the identifier
///
/// Returns an empty string for input that is neither; callers skip those.
///
/// # Examples
///
/// ```
/// use gistwatcher::gist::extract_gist_id;
///
/// assert_eq!(extract_gist_id("https://gist.github.com/user/abc123"), "abc123");
/// assert_eq!(extract_gist_id("short"), "");
/// ```
pub fn extract_gist_id(input: &str) -> String {
    let input = input.trim();

    if input.contains(GIST_HOST) {
        input.rsplit('/').next().unwrap_or_default().to_string()
    } else if input.chars().count() == GIST_ID_LEN {
        input.to_string()
    } else {
        String::new()
    }
}

/// Extracts identifiers from a comma-separated list, one entry per token
pub fn parse_id_list(list: &str) -> Vec<String> {
    list.split(',').map(extract_gist_id).collect()
}

/// Reads identifiers from a file, one per line
///
/// Blank lines are skipped and reading stops at a line equal to `end`.
pub fn read_id_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let reader = BufReader::new(File::open(path)?);
    let mut ids = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line == END_MARKER {
            break;
        }
        if !line.is_empty() {
            ids.push(extract_gist_id(line));
        }
    }

    tracing::debug!("Read {} entries from {}", ids.len(), path.display());
    Ok(ids)
}
