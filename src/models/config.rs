use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub cleaning: CleaningConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub categories: CategoriesConfig,

    #[serde(default)]
    pub playlist: PlaylistConfig,

    #[serde(default)]
    pub paths: PathsConfig,
}

/// Remote source fetching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User agent sent with every outbound request
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Per-request timeout when downloading a source list, in seconds
    #[serde(default = "defaults::fetch_timeout_secs")]
    pub timeout_secs: u64,
}

/// Liveness probing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Hard ceiling for a single probe attempt, in seconds
    #[serde(default = "defaults::probe_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of probes running at once
    #[serde(default = "defaults::probe_concurrency")]
    pub max_concurrent: usize,

    /// Program invoked to check rtmp/rtsp streams
    #[serde(default = "defaults::ffprobe_command")]
    pub ffprobe_command: String,

    /// Request template for the proprietary p2p handshake. `{path}` and
    /// `{host}` are substituted before sending.
    #[serde(default = "defaults::p2p_request")]
    pub p2p_request: String,

    /// Substring expected in a p2p response for the stream to count as alive
    #[serde(default = "defaults::p2p_expect")]
    pub p2p_expect: String,
}

/// Channel name cleaning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Decoration tokens removed from names, applied in order
    #[serde(default = "defaults::remove_tokens")]
    pub remove_tokens: Vec<String>,

    /// Substring rewrites applied after token removal, in order
    #[serde(default = "defaults::rewrites")]
    pub rewrites: Vec<Replacement>,
}

/// One substring rewrite rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

/// Output size limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum sources kept per channel name across all categories.
    /// -1 means unlimited.
    #[serde(default = "defaults::max_sources_per_channel")]
    pub max_sources_per_channel: i64,

    /// Measured whitelist entries at or above this latency (ms) are ignored
    /// during aggregation
    #[serde(default = "defaults::whitelist_latency_threshold_ms")]
    pub whitelist_latency_threshold_ms: f64,
}

/// One category dictionary: the label shown in outputs and the file
/// (relative to the assets directory) listing its channel names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub label: String,
    pub file: String,
}

/// Category dictionaries and presentation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesConfig {
    /// Main categories, matched before regional ones, in declaration order
    #[serde(default = "defaults::main_categories")]
    pub main: Vec<CategorySpec>,

    /// Regional categories, matched after every main category
    #[serde(default = "defaults::regional_categories")]
    pub regional: Vec<CategorySpec>,

    /// Categories sorted by dictionary position instead of name
    #[serde(default = "defaults::ordered_categories")]
    pub ordered: Vec<String>,

    /// Categories making up the lite list, in output order
    #[serde(default = "defaults::lite_categories")]
    pub lite: Vec<String>,

    /// Categories appended after the lite block in the full list
    #[serde(default = "defaults::full_extra_categories")]
    pub full_extra: Vec<String>,
}

/// M3U rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// EPG address stamped into the playlist header
    #[serde(default = "defaults::tvg_url")]
    pub tvg_url: String,

    /// Logo URL template; `{name}` is replaced with the channel name
    #[serde(default = "defaults::logo_url_template")]
    pub logo_url_template: String,

    /// Stream URL paired with the timestamp in the version line
    #[serde(default = "defaults::version_stream_url")]
    pub version_stream_url: String,
}

/// Input and output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding source lists, dictionaries, and white/blacklists
    #[serde(default = "defaults::assets_dir")]
    pub assets_dir: String,

    /// Directory receiving generated lists and playlists
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,
}

mod defaults {
    use super::{CategorySpec, Replacement};

    pub fn user_agent() -> String {
        "PostmanRuntime-ApipostRuntime/1.1.0".to_string()
    }

    pub fn fetch_timeout_secs() -> u64 {
        10
    }

    pub fn probe_timeout_secs() -> u64 {
        5
    }

    pub fn probe_concurrency() -> usize {
        30
    }

    pub fn ffprobe_command() -> String {
        "ffprobe".to_string()
    }

    pub fn p2p_request() -> String {
        "YOUR_CUSTOM_REQUEST {path}\r\nHost: {host}\r\n\r\n".to_string()
    }

    pub fn p2p_expect() -> String {
        "SOME_EXPECTED_RESPONSE".to_string()
    }

    pub fn remove_tokens() -> Vec<String> {
        [
            "「IPV4」", "「IPV6」", "[ipv6]", "[ipv4]", "_电信", "电信", "（HD）", "[超清]",
            "高清", "超清", "-HD", "(HK)", "AKtv", "@", "IPV6", "🎞️", "🎦", " ",
            "[BD]", "[VGA]", "[HD]", "[SD]", "(1080p)", "(720p)", "(480p)",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    pub fn rewrites() -> Vec<Replacement> {
        [
            ("CCTV-", "CCTV"),
            ("CCTV0", "CCTV"),
            ("PLUS", "+"),
            ("NewTV-", "NewTV"),
            ("iHOT-", "iHOT"),
            ("NEW", "New"),
            ("New_", "New"),
        ]
        .iter()
        .map(|(from, to)| Replacement {
            from: from.to_string(),
            to: to.to_string(),
        })
        .collect()
    }

    pub fn max_sources_per_channel() -> i64 {
        20
    }

    pub fn whitelist_latency_threshold_ms() -> f64 {
        2000.0
    }

    fn specs(entries: &[(&str, &str)]) -> Vec<CategorySpec> {
        entries
            .iter()
            .map(|(label, file)| CategorySpec {
                label: label.to_string(),
                file: file.to_string(),
            })
            .collect()
    }

    pub fn main_categories() -> Vec<CategorySpec> {
        specs(&[
            ("央视频道", "main/央视频道.txt"),
            ("卫视频道", "main/卫视频道.txt"),
            ("体育频道", "main/体育频道.txt"),
            ("电影频道", "main/电影.txt"),
            ("电视剧频道", "main/电视剧.txt"),
            ("港澳台", "main/港澳台.txt"),
            ("国际台", "main/国际台.txt"),
            ("纪录片", "main/纪录片.txt"),
            ("戏曲频道", "main/戏曲频道.txt"),
            ("解说频道", "main/解说频道.txt"),
            ("春晚", "main/春晚.txt"),
            ("NewTV", "main/NewTV.txt"),
            ("iHOT", "main/iHOT.txt"),
            ("儿童频道", "main/儿童频道.txt"),
            ("综艺频道", "main/综艺频道.txt"),
            ("埋堆堆", "main/埋堆堆.txt"),
            ("音乐频道", "main/音乐频道.txt"),
            ("游戏频道", "main/游戏频道.txt"),
            ("收音机频道", "main/收音机频道.txt"),
            ("直播中国", "main/直播中国.txt"),
            ("MTV", "main/MTV.txt"),
            ("咪咕直播", "main/咪咕直播.txt"),
        ])
    }

    pub fn regional_categories() -> Vec<CategorySpec> {
        specs(&[
            ("上海频道", "regional/上海频道.txt"),
            ("浙江频道", "regional/浙江频道.txt"),
            ("江苏频道", "regional/江苏频道.txt"),
            ("广东频道", "regional/广东频道.txt"),
            ("湖南频道", "regional/湖南频道.txt"),
            ("安徽频道", "regional/安徽频道.txt"),
            ("海南频道", "regional/海南频道.txt"),
            ("内蒙频道", "regional/内蒙频道.txt"),
            ("湖北频道", "regional/湖北频道.txt"),
            ("辽宁频道", "regional/辽宁频道.txt"),
            ("陕西频道", "regional/陕西频道.txt"),
            ("山西频道", "regional/山西频道.txt"),
            ("山东频道", "regional/山东频道.txt"),
            ("云南频道", "regional/云南频道.txt"),
            ("北京频道", "regional/北京频道.txt"),
            ("重庆频道", "regional/重庆频道.txt"),
            ("福建频道", "regional/福建频道.txt"),
            ("甘肃频道", "regional/甘肃频道.txt"),
            ("广西频道", "regional/广西频道.txt"),
            ("贵州频道", "regional/贵州频道.txt"),
            ("河北频道", "regional/河北频道.txt"),
            ("河南频道", "regional/河南频道.txt"),
            ("黑龙江频道", "regional/黑龙江频道.txt"),
            ("吉林频道", "regional/吉林频道.txt"),
            ("江西频道", "regional/江西频道.txt"),
            ("宁夏频道", "regional/宁夏频道.txt"),
            ("青海频道", "regional/青海频道.txt"),
            ("四川频道", "regional/四川频道.txt"),
            ("天津频道", "regional/天津频道.txt"),
            ("新疆频道", "regional/新疆频道.txt"),
        ])
    }

    pub fn ordered_categories() -> Vec<String> {
        ["央视频道", "卫视频道", "港澳台", "电影频道", "电视剧频道", "综艺频道", "埋堆堆"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn lite_categories() -> Vec<String> {
        [
            "央视频道", "卫视频道", "港澳台", "电影频道", "电视剧频道", "综艺频道",
            "NewTV", "iHOT", "体育频道", "咪咕直播", "埋堆堆", "音乐频道", "游戏频道", "解说频道",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    pub fn full_extra_categories() -> Vec<String> {
        [
            "儿童频道", "国际台", "纪录片", "戏曲频道", "上海频道", "湖南频道",
            "湖北频道", "广东频道", "浙江频道", "山东频道", "江苏频道", "安徽频道",
            "海南频道", "内蒙频道", "辽宁频道", "陕西频道", "山西频道", "云南频道",
            "北京频道", "重庆频道", "福建频道", "甘肃频道", "广西频道", "贵州频道",
            "河北频道", "河南频道", "黑龙江频道", "吉林频道", "江西频道", "宁夏频道",
            "青海频道", "四川频道", "天津频道", "新疆频道", "春晚", "直播中国", "MTV", "收音机频道",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    pub fn tvg_url() -> String {
        "https://github.com/CCSH/IPTV/raw/refs/heads/main/e.xml.gz".to_string()
    }

    pub fn logo_url_template() -> String {
        "https://raw.githubusercontent.com/CCSH/IPTV/refs/heads/main/logo/{name}.png".to_string()
    }

    pub fn version_stream_url() -> String {
        "https://gcalic.v.myalicdn.com/gc/wgw05_1/index.m3u8?contentid=2820180516001".to_string()
    }

    pub fn assets_dir() -> String {
        "assets".to_string()
    }

    pub fn output_dir() -> String {
        "dist".to_string()
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::fetch_timeout_secs(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::probe_timeout_secs(),
            max_concurrent: defaults::probe_concurrency(),
            ffprobe_command: defaults::ffprobe_command(),
            p2p_request: defaults::p2p_request(),
            p2p_expect: defaults::p2p_expect(),
        }
    }
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            remove_tokens: defaults::remove_tokens(),
            rewrites: defaults::rewrites(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_sources_per_channel: defaults::max_sources_per_channel(),
            whitelist_latency_threshold_ms: defaults::whitelist_latency_threshold_ms(),
        }
    }
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            main: defaults::main_categories(),
            regional: defaults::regional_categories(),
            ordered: defaults::ordered_categories(),
            lite: defaults::lite_categories(),
            full_extra: defaults::full_extra_categories(),
        }
    }
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            tvg_url: defaults::tvg_url(),
            logo_url_template: defaults::logo_url_template(),
            version_stream_url: defaults::version_stream_url(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            assets_dir: defaults::assets_dir(),
            output_dir: defaults::output_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            probe: ProbeConfig::default(),
            cleaning: CleaningConfig::default(),
            limits: LimitsConfig::default(),
            categories: CategoriesConfig::default(),
            playlist: PlaylistConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl PathsConfig {
    fn asset(&self, name: &str) -> String {
        format!("{}/{}", self.assets_dir, name)
    }

    /// Key for an output artifact
    pub fn output(&self, name: &str) -> String {
        format!("{}/{}", self.output_dir, name)
    }

    /// Remote source list, one URL per line
    pub fn urls_file(&self) -> String {
        self.asset("urls.txt")
    }

    /// Name correction rules, one `correct,wrong1,wrong2,...` per line
    pub fn corrections_file(&self) -> String {
        self.asset("corrections_name.txt")
    }

    pub fn whitelist_manual(&self) -> String {
        self.asset("whitelist-blacklist/whitelist_manual.txt")
    }

    pub fn whitelist_auto(&self) -> String {
        self.asset("whitelist-blacklist/whitelist_auto.txt")
    }

    pub fn whitelist_auto_tv(&self) -> String {
        self.asset("whitelist-blacklist/whitelist_auto_tv.txt")
    }

    pub fn blacklist_manual(&self) -> String {
        self.asset("whitelist-blacklist/blacklist_manual.txt")
    }

    pub fn blacklist_auto(&self) -> String {
        self.asset("whitelist-blacklist/blacklist_auto.txt")
    }

    /// Dictionary file for a category spec
    pub fn category_file(&self, file: &str) -> String {
        self.asset(file)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is missing
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Failed to load config from {:?}: {}. Using defaults.",
                    path.as_ref(),
                    e
                );
                Config::default()
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be at least 1"));
        }
        if self.probe.timeout_secs == 0 {
            return Err(AppError::validation("probe.timeout_secs must be at least 1"));
        }
        if self.probe.max_concurrent == 0 {
            return Err(AppError::validation("probe.max_concurrent must be at least 1"));
        }
        if self.probe.ffprobe_command.is_empty() {
            return Err(AppError::validation("probe.ffprobe_command is empty"));
        }
        if self.limits.whitelist_latency_threshold_ms <= 0.0 {
            return Err(AppError::validation(
                "limits.whitelist_latency_threshold_ms must be positive",
            ));
        }
        if self.categories.main.is_empty() {
            return Err(AppError::validation("categories.main has no entries"));
        }

        let declared: std::collections::HashSet<&str> = self
            .categories
            .main
            .iter()
            .chain(self.categories.regional.iter())
            .map(|spec| spec.label.as_str())
            .collect();
        for (section, labels) in [
            ("categories.ordered", &self.categories.ordered),
            ("categories.lite", &self.categories.lite),
            ("categories.full_extra", &self.categories.full_extra),
        ] {
            if let Some(unknown) = labels.iter().find(|label| !declared.contains(label.as_str())) {
                return Err(AppError::validation(format!(
                    "{} references undeclared category '{}'",
                    section, unknown
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.probe.max_concurrent, 30);
        assert_eq!(config.limits.max_sources_per_channel, 20);
        assert_eq!(config.categories.main.len(), 22);
        assert_eq!(config.categories.regional.len(), 30);
        assert_eq!(config.categories.full_extra.len(), 38);
    }

    #[test]
    fn test_validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetch.user_agent = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.probe.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_undeclared_lite_label() {
        let mut config = Config::default();
        config.categories.lite.push("不存在的分类".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("不存在的分类"));
    }

    #[test]
    fn test_parse_partial_toml_fills_defaults() {
        let toml_str = r#"
            [probe]
            timeout_secs = 3
            max_concurrent = 8

            [paths]
            output_dir = "out"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.probe.timeout_secs, 3);
        assert_eq!(config.probe.max_concurrent, 8);
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.paths.output_dir, "out");
        assert_eq!(config.paths.output("live.txt"), "out/live.txt");
    }

    #[test]
    fn test_category_file_paths() {
        let paths = PathsConfig::default();
        assert_eq!(paths.urls_file(), "assets/urls.txt");
        assert_eq!(
            paths.whitelist_auto(),
            "assets/whitelist-blacklist/whitelist_auto.txt"
        );
        assert_eq!(paths.category_file("main/央视频道.txt"), "assets/main/央视频道.txt");
    }
}
