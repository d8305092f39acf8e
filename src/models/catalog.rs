// src/models/catalog.rs

//! Category dictionaries, name corrections, and the merged URL blacklist.

use std::collections::{HashMap, HashSet};

use crate::models::config::{CategoriesConfig, PathsConfig};
use crate::utils::fs::read_lines_or_warn;

/// One category: its output label and the channel names it accepts.
/// `names` keeps file order because ordered categories sort by position.
#[derive(Debug, Clone)]
pub struct Category {
    pub label: String,
    pub names: Vec<String>,
    name_set: HashSet<String>,
}

impl Category {
    pub fn new(label: impl Into<String>, names: Vec<String>) -> Self {
        let name_set = names.iter().cloned().collect();
        Self {
            label: label.into(),
            names,
            name_set,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_set.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// All categories in matching priority order: every main category before
/// every regional one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Load every dictionary file named by the configuration. Missing files
    /// warn and leave the category empty.
    pub fn load(categories: &CategoriesConfig, paths: &PathsConfig) -> Self {
        let mut loaded = Vec::with_capacity(categories.main.len() + categories.regional.len());
        for spec in categories.main.iter().chain(categories.regional.iter()) {
            let names = read_lines_or_warn(paths.category_file(&spec.file));
            log::info!("Loaded category {}: {} names", spec.label, names.len());
            loaded.push(Category::new(spec.label.clone(), names));
        }
        Self { categories: loaded }
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn get(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    /// Dictionary order for a category, used as the sort sequence of
    /// ordered categories. Unknown labels yield an empty sequence.
    pub fn sequence(&self, label: &str) -> &[String] {
        self.get(label).map(|c| c.names.as_slice()).unwrap_or(&[])
    }
}

/// Channel name correction rules: maps every known wrong spelling to its
/// canonical name.
#[derive(Debug, Clone, Default)]
pub struct CorrectionMap {
    map: HashMap<String, String>,
}

impl CorrectionMap {
    /// Parse `correct,wrong1,wrong2,...` lines.
    pub fn from_lines(lines: &[String]) -> Self {
        let mut map = HashMap::new();
        for line in lines {
            if !line.contains(',') {
                continue;
            }
            let mut parts = line.split(',');
            let Some(correct) = parts.next().map(str::trim) else {
                continue;
            };
            if correct.is_empty() {
                continue;
            }
            for wrong in parts.map(str::trim).filter(|w| !w.is_empty()) {
                map.insert(wrong.to_string(), correct.to_string());
            }
        }
        Self { map }
    }

    pub fn load(path: &str) -> Self {
        let corrections = Self::from_lines(&read_lines_or_warn(path));
        log::info!("Loaded name correction rules: {}", corrections.len());
        corrections
    }

    /// Canonical spelling for a name; unknown names pass through.
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.map.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Merged set of blacklisted stream URLs from the manual and generated
/// blacklist files.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    urls: HashSet<String>,
}

impl Blacklist {
    /// Merge the URL field of every `name,url` record in both files.
    pub fn load(auto_path: &str, manual_path: &str) -> Self {
        let mut urls = HashSet::new();
        for path in [auto_path, manual_path] {
            for line in read_lines_or_warn(path) {
                if let Some(url) = line.split(',').nth(1) {
                    let url = url.trim();
                    if !url.is_empty() {
                        urls.insert(url.to_string());
                    }
                }
            }
        }
        log::info!("Merged blacklist URLs: {}", urls.len());
        Self { urls }
    }

    pub fn from_urls(urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_category_membership_and_order() {
        let category = Category::new(
            "央视频道",
            vec!["CCTV1综合".to_string(), "CCTV2财经".to_string()],
        );
        assert!(category.contains("CCTV1综合"));
        assert!(!category.contains("湖南卫视"));
        assert_eq!(category.names[0], "CCTV1综合");
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = Catalog::from_categories(vec![
            Category::new("央视频道", vec!["CCTV1综合".to_string()]),
            Category::new("卫视频道", vec!["湖南卫视".to_string()]),
        ]);
        assert!(catalog.get("卫视频道").is_some());
        assert_eq!(catalog.sequence("央视频道"), ["CCTV1综合".to_string()]);
        assert!(catalog.sequence("没有的分类").is_empty());
    }

    #[test]
    fn test_corrections_map_wrong_to_correct() {
        let corrections = CorrectionMap::from_lines(&[
            "CCTV1综合,CCTV1,CCTV-1综合".to_string(),
            "凤凰中文,凤凰中文台".to_string(),
            "无逗号的行".to_string(),
        ]);
        assert_eq!(corrections.len(), 3);
        assert_eq!(corrections.canonical("CCTV1"), "CCTV1综合");
        assert_eq!(corrections.canonical("CCTV-1综合"), "CCTV1综合");
        assert_eq!(corrections.canonical("凤凰中文台"), "凤凰中文");
        assert_eq!(corrections.canonical("湖南卫视"), "湖南卫视");
    }

    #[test]
    fn test_blacklist_merges_both_files() {
        let dir = TempDir::new().unwrap();
        let auto = dir.path().join("blacklist_auto.txt");
        let manual = dir.path().join("blacklist_manual.txt");
        std::fs::write(&auto, "CCTV1,http://dead.example.com/1\nno-url-line\n").unwrap();
        std::fs::write(&manual, "某台,http://dead.example.com/2\n").unwrap();

        let blacklist = Blacklist::load(auto.to_str().unwrap(), manual.to_str().unwrap());
        assert_eq!(blacklist.len(), 2);
        assert!(blacklist.contains("http://dead.example.com/1"));
        assert!(blacklist.contains("http://dead.example.com/2"));
        assert!(!blacklist.contains("http://alive.example.com/3"));
    }
}
