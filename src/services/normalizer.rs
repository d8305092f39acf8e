//! Channel name normalization.

use crate::models::{CleaningConfig, CorrectionMap, Replacement};
use crate::utils::text::to_simplified;

/// Normalizes raw channel names into their canonical form: traditional
/// characters simplified, decoration tokens removed, spelling rewrites
/// applied, then the corrections table consulted.
///
/// Classification and the per-channel source cap both key on the result,
/// so every record must pass through here before either.
pub struct NameNormalizer {
    remove_tokens: Vec<String>,
    rewrites: Vec<Replacement>,
    corrections: CorrectionMap,
}

impl NameNormalizer {
    pub fn new(cleaning: &CleaningConfig, corrections: CorrectionMap) -> Self {
        Self {
            remove_tokens: cleaning.remove_tokens.clone(),
            rewrites: cleaning.rewrites.clone(),
            corrections,
        }
    }

    pub fn normalize(&self, name: &str) -> String {
        let mut name = to_simplified(name);
        for token in &self.remove_tokens {
            name = name.replace(token.as_str(), "");
        }
        for rule in &self.rewrites {
            name = name.replace(&rule.from, &rule.to);
        }
        self.corrections.canonical(name.trim()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(corrections: &[&str]) -> NameNormalizer {
        let lines: Vec<String> = corrections.iter().map(|s| s.to_string()).collect();
        NameNormalizer::new(&CleaningConfig::default(), CorrectionMap::from_lines(&lines))
    }

    #[test]
    fn test_strips_decorations_and_rewrites() {
        let n = normalizer(&[]);
        assert_eq!(n.normalize("CCTV-1 高清"), "CCTV1");
        assert_eq!(n.normalize("CCTV5PLUS"), "CCTV5+");
        assert_eq!(n.normalize("湖南卫视「IPV6」"), "湖南卫视");
        assert_eq!(n.normalize("翡翠台(HK)[超清]"), "翡翠台");
    }

    #[test]
    fn test_rewrites_apply_in_order() {
        let n = normalizer(&[]);
        // NEW -> New first, then New_ -> New
        assert_eq!(n.normalize("NEW_视觉"), "New视觉");
        assert_eq!(n.normalize("NewTV-武侠剧场"), "NewTV武侠剧场");
    }

    #[test]
    fn test_traditional_converted_before_matching() {
        let n = normalizer(&["凤凰中文,凤凰卫视中文台"]);
        assert_eq!(n.normalize("鳳凰衛視中文台"), "凤凰中文");
    }

    #[test]
    fn test_corrections_apply_last() {
        let n = normalizer(&["CCTV1综合,CCTV1"]);
        // cleaning yields CCTV1, which the corrections table then fixes up
        assert_eq!(n.normalize("CCTV-1 高清"), "CCTV1综合");
        assert_eq!(n.normalize("未知台"), "未知台");
    }
}
