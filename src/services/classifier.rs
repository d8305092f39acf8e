// src/services/classifier.rs

//! Routes normalized channel records into category buckets.

use std::collections::{HashMap, HashSet};

use crate::models::{Blacklist, Catalog, ChannelLine, LimitsConfig};

#[derive(Debug, Clone, Default)]
struct Bucket {
    lines: Vec<ChannelLine>,
    seen_urls: HashSet<String>,
}

#[derive(Debug, Default)]
struct OtherBucket {
    lines: Vec<String>,
    seen_urls: HashSet<String>,
}

/// Classifies records into the first category whose dictionary contains the
/// name, with per-category URL dedup and a global per-channel source cap.
///
/// Records whose name matches but whose URL is already taken (or is a
/// loopback address) fall through to the catch-all bucket, as do records no
/// dictionary knows. Blacklisted URLs are dropped everywhere.
pub struct ClassificationEngine {
    catalog: Catalog,
    blacklist: Blacklist,
    // negative configured cap means unlimited
    max_per_channel: Option<usize>,
    label_index: HashMap<String, usize>,
    buckets: Vec<Bucket>,
    counts: HashMap<String, usize>,
    other: OtherBucket,
}

impl ClassificationEngine {
    pub fn new(catalog: Catalog, blacklist: Blacklist, limits: &LimitsConfig) -> Self {
        let max_per_channel = usize::try_from(limits.max_sources_per_channel).ok();
        let label_index = catalog
            .categories
            .iter()
            .enumerate()
            .map(|(idx, category)| (category.label.clone(), idx))
            .collect();
        let buckets = vec![Bucket::default(); catalog.categories.len()];
        Self {
            catalog,
            blacklist,
            max_per_channel,
            label_index,
            buckets,
            counts: HashMap::new(),
            other: OtherBucket::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Route one record. The cap is checked before any matching, so a
    /// capped channel stops accumulating sources everywhere, including the
    /// catch-all bucket.
    pub fn classify(&mut self, line: &ChannelLine) {
        if line.url.is_empty()
            || self.blacklist.contains(&line.url)
            || self.at_capacity(&line.name)
        {
            return;
        }
        for idx in 0..self.catalog.categories.len() {
            if self.catalog.categories[idx].contains(&line.name) && !self.url_taken(idx, &line.url)
            {
                let bucket = &mut self.buckets[idx];
                bucket.seen_urls.insert(line.url.clone());
                bucket.lines.push(line.clone());
                *self.counts.entry(line.name.clone()).or_insert(0) += 1;
                return;
            }
        }
        self.push_other_record(line);
    }

    /// Lines collected for a category label, in arrival order.
    pub fn category_lines(&self, label: &str) -> &[ChannelLine] {
        self.label_index
            .get(label)
            .map(|&idx| self.buckets[idx].lines.as_slice())
            .unwrap_or(&[])
    }

    /// The catch-all list, markers and separators included.
    pub fn other_lines(&self) -> &[String] {
        &self.other.lines
    }

    /// Append a `label,#genre#` marker to the catch-all list.
    pub fn push_other_marker(&mut self, label: &str) {
        self.other.lines.push(format!("{},#genre#", label));
    }

    /// Append a blank separator to the catch-all list.
    pub fn push_other_separator(&mut self) {
        self.other.lines.push(String::new());
    }

    fn at_capacity(&self, name: &str) -> bool {
        match self.max_per_channel {
            Some(max) => self.counts.get(name).copied().unwrap_or(0) >= max,
            None => false,
        }
    }

    fn url_taken(&self, idx: usize, url: &str) -> bool {
        url.contains("127.0.0.1") || self.buckets[idx].seen_urls.contains(url)
    }

    fn push_other_record(&mut self, line: &ChannelLine) {
        if !self.other.seen_urls.contains(&line.url) && !self.blacklist.contains(&line.url) {
            self.other.seen_urls.insert(line.url.clone());
            self.other.lines.push(line.to_string());
        }
    }
}
