//! Deterministic ordering of category lines for output.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::ChannelLine;

/// Sorts the lines of a category before rendering.
///
/// Categories named in the ordered set follow their dictionary position
/// (unknown names last, arrival order preserved); every other category is
/// sorted by name with punctuation and decorations stripped from the key.
pub struct OrderingEngine {
    ordered: HashSet<String>,
    strip_pattern: Regex,
}

impl OrderingEngine {
    pub fn new(ordered: &[String]) -> Result<Self> {
        let strip_pattern = Regex::new(r"[^\w\x{4e00}-\x{9fff}]")
            .map_err(|e| AppError::config(format!("bad ordering strip pattern: {}", e)))?;
        Ok(Self {
            ordered: ordered.iter().cloned().collect(),
            strip_pattern,
        })
    }

    pub fn sort_category(&self, label: &str, lines: &mut [ChannelLine], sequence: &[String]) {
        if self.ordered.contains(label) {
            let rank: HashMap<&str, usize> = sequence
                .iter()
                .enumerate()
                .map(|(idx, name)| (name.as_str(), idx))
                .collect();
            lines.sort_by_key(|line| rank.get(line.name.as_str()).copied().unwrap_or(sequence.len()));
        } else {
            lines.sort_by_cached_key(|line| self.sort_key(&line.name));
        }
    }

    /// Name with every non-word character removed; falls back to the raw
    /// name when stripping leaves nothing.
    fn sort_key(&self, name: &str) -> String {
        let stripped = self.strip_pattern.replace_all(name, "");
        if stripped.is_empty() {
            name.to_string()
        } else {
            stripped.into_owned()
        }
    }
}
