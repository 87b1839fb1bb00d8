//! Genre lists are stored in a single delimited text column.

const DELIMITER: char = ',';

/// Width of the `genres` column
pub const MAX_STORED_LEN: usize = 120;

/// Normalize a genre list for storage: entries are trimmed, must be non-empty
/// and must not contain the delimiter.
pub fn normalize(genres: &[String]) -> Result<Vec<String>, String> {
    genres
        .iter()
        .map(|g| {
            let g = g.trim();
            if g.is_empty() {
                Err("genre names must not be empty".to_string())
            } else if g.contains(DELIMITER) {
                Err(format!("genre '{}' must not contain '{}'", g, DELIMITER))
            } else {
                Ok(g.to_string())
            }
        })
        .collect()
}

pub fn join(genres: &[String]) -> String {
    genres.join(&DELIMITER.to_string())
}

pub fn split(raw: &str) -> Vec<String> {
    raw.split(DELIMITER)
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}
