// src/utils/fs.rs

//! Filesystem helpers for reading input lists.

use std::path::Path;

/// Read a text file as trimmed, non-empty lines.
///
/// A missing or unreadable file logs a warning and yields no lines, so
/// optional inputs (manual whitelists, category dictionaries) degrade to
/// empty instead of aborting a run.
pub fn read_lines_or_warn(path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_lines_trims_and_skips_blanks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.txt");
        std::fs::write(&path, "  CCTV1综合  \n\n湖南卫视\n   \n").unwrap();

        let lines = read_lines_or_warn(&path);
        assert_eq!(lines, vec!["CCTV1综合", "湖南卫视"]);
    }

    #[test]
    fn test_read_lines_missing_file_is_empty() {
        let lines = read_lines_or_warn("/nonexistent/surely/missing.txt");
        assert!(lines.is_empty());
    }
}
