// src/pipeline/build.rs

//! Aggregation run: whitelists and remote sources are normalized,
//! classified, and ordered into the live text lists and M3U playlists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Blacklist, Catalog, ChannelLine, Config, CorrectionMap};
use crate::services::{
    ClassificationEngine, NameNormalizer, OrderingEngine, SourceFetcher, playlist,
};
use crate::storage::ListStorage;
use crate::utils::read_lines_or_warn;

use super::{list_header, write_or_report, write_text_or_report};

/// Summary of one build run, written to `build_stats.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub blacklist_count: usize,
    pub whitelist_manual_count: usize,
    /// Measured whitelist entries kept after the latency filter
    pub whitelist_auto_kept: usize,
    pub source_count: usize,
    pub live_line_count: usize,
    pub lite_line_count: usize,
    pub other_line_count: usize,
}

/// Run the build: classify every whitelist and remote record, then write
/// the live lists, the catch-all list, and the rendered playlists.
pub async fn run_build(config: &Config, storage: &dyn ListStorage) -> Result<BuildStats> {
    let started_at = Utc::now();
    log::info!("Build run starting");

    let blacklist = Blacklist::load(
        &config.paths.blacklist_auto(),
        &config.paths.blacklist_manual(),
    );
    let corrections = CorrectionMap::load(&config.paths.corrections_file());
    let catalog = Catalog::load(&config.categories, &config.paths);
    log::info!(
        "Loaded {} blacklist URLs, {} correction rules",
        blacklist.len(),
        corrections.len()
    );

    let blacklist_count = blacklist.len();
    let normalizer = NameNormalizer::new(&config.cleaning, corrections);
    let ordering = OrderingEngine::new(&config.categories.ordered)?;
    let mut engine = ClassificationEngine::new(catalog, blacklist, &config.limits);

    log::info!("Classifying manual whitelist");
    let manual_lines = read_lines_or_warn(config.paths.whitelist_manual());
    engine.push_other_marker("白名单");
    for raw in &manual_lines {
        classify_line(&mut engine, &normalizer, raw);
    }

    log::info!(
        "Classifying measured whitelist (latency < {}ms)",
        config.limits.whitelist_latency_threshold_ms
    );
    let auto_lines = read_lines_or_warn(config.paths.whitelist_auto());
    engine.push_other_marker("白名单测速");
    let mut whitelist_auto_kept = 0usize;
    for raw in &auto_lines {
        if let Some(record) =
            strip_latency_prefix(raw, config.limits.whitelist_latency_threshold_ms)
        {
            whitelist_auto_kept += 1;
            classify_line(&mut engine, &normalizer, record);
        }
    }

    let sources: Vec<String> = read_lines_or_warn(config.paths.urls_file())
        .into_iter()
        .filter(|url| url.starts_with("http"))
        .collect();
    let fetcher = SourceFetcher::new(&config.fetch)?;
    for url in &sources {
        log::info!("Fetching source {}", url);
        engine.push_other_marker(url);
        match fetcher.fetch_source(url).await {
            Ok(lines) => {
                log::info!("Source {}: {} lines", url, lines.len());
                for raw in &lines {
                    classify_line(&mut engine, &normalizer, raw);
                }
                engine.push_other_separator();
            }
            Err(e) => log::warn!("Source {} skipped: {}", url, e),
        }
    }

    let (full, lite) = assemble_lists(&engine, &ordering, config);

    write_or_report(storage, &config.paths.output("live.txt"), &full).await;
    write_or_report(storage, &config.paths.output("live_lite.txt"), &lite).await;
    write_or_report(
        storage,
        &config.paths.output("others.txt"),
        engine.other_lines(),
    )
    .await;

    let full_m3u = playlist::render_m3u(
        &full,
        &config.playlist.tvg_url,
        &config.playlist.logo_url_template,
    );
    let lite_m3u = playlist::render_m3u(
        &lite,
        &config.playlist.tvg_url,
        &config.playlist.logo_url_template,
    );
    write_text_or_report(storage, &config.paths.output("live.m3u"), &full_m3u).await;
    write_text_or_report(storage, &config.paths.output("live_lite.m3u"), &lite_m3u).await;

    let finished_at = Utc::now();
    let stats = BuildStats {
        started_at,
        finished_at,
        blacklist_count,
        whitelist_manual_count: manual_lines.len(),
        whitelist_auto_kept,
        source_count: sources.len(),
        live_line_count: full.len(),
        lite_line_count: lite.len(),
        other_line_count: engine.other_lines().len(),
    };
    let json = serde_json::to_string_pretty(&stats)?;
    write_text_or_report(storage, &config.paths.output("build_stats.json"), &json).await;

    let elapsed = finished_at - started_at;
    log::info!(
        "Build done in {}m {}s: live {} lines, lite {} lines, others {} lines",
        elapsed.num_seconds() / 60,
        elapsed.num_seconds() % 60,
        stats.live_line_count,
        stats.lite_line_count,
        stats.other_line_count
    );
    Ok(stats)
}

/// Parse, normalize, and classify one raw record line.
fn classify_line(engine: &mut ClassificationEngine, normalizer: &NameNormalizer, raw: &str) {
    if let Some(line) = ChannelLine::parse(raw) {
        let name = normalizer.normalize(&line.name);
        engine.classify(&ChannelLine::new(name, line.url));
    }
}

/// `"123.45ms,name,url"` → `"name,url"` when the latency prefix parses
/// below the threshold. Header, marker, and malformed lines yield `None`;
/// an unparsable prefix counts as slow.
fn strip_latency_prefix(line: &str, threshold_ms: f64) -> Option<&str> {
    if line.contains("#genre#") || !line.contains("://") {
        return None;
    }
    let (prefix, rest) = line.split_once(',')?;
    let latency: f64 = prefix
        .trim()
        .trim_end_matches("ms")
        .parse()
        .unwrap_or(60000.0);
    if latency < threshold_ms { Some(rest) } else { None }
}

/// Assemble the full and lite line lists: shared header, then one block
/// per configured category in order.
fn assemble_lists(
    engine: &ClassificationEngine,
    ordering: &OrderingEngine,
    config: &Config,
) -> (Vec<String>, Vec<String>) {
    let mut lite = list_header(&config.playlist);
    for label in &config.categories.lite {
        lite.extend(category_block(engine, ordering, label));
    }
    strip_trailing_blank(&mut lite);

    let mut full = lite.clone();
    full.push(String::new());
    for label in &config.categories.full_extra {
        full.extend(category_block(engine, ordering, label));
    }
    strip_trailing_blank(&mut full);

    (full, lite)
}

/// `label,#genre#` marker, the category's ordered records, and a blank
/// separator.
fn category_block(
    engine: &ClassificationEngine,
    ordering: &OrderingEngine,
    label: &str,
) -> Vec<String> {
    let mut lines = engine.category_lines(label).to_vec();
    ordering.sort_category(label, &mut lines, engine.catalog().sequence(label));

    let mut block = Vec::with_capacity(lines.len() + 2);
    block.push(format!("{},#genre#", label));
    block.extend(lines.iter().map(|line| line.to_string()));
    block.push(String::new());
    block
}

fn strip_trailing_blank(lines: &mut Vec<String>) {
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CleaningConfig};

    #[test]
    fn test_strip_latency_prefix_keeps_fast_entries() {
        assert_eq!(
            strip_latency_prefix("123.45ms,CCTV1,http://a/1", 2000.0),
            Some("CCTV1,http://a/1")
        );
        assert_eq!(
            strip_latency_prefix("1999.99ms,CCTV1,http://a/1", 2000.0),
            Some("CCTV1,http://a/1")
        );
    }

    #[test]
    fn test_strip_latency_prefix_drops_slow_and_headers() {
        // at the threshold is already too slow
        assert_eq!(strip_latency_prefix("2000.00ms,CCTV1,http://a/1", 2000.0), None);
        // genre marker
        assert_eq!(strip_latency_prefix("RespoTime,whitelist,#genre#", 2000.0), None);
        // version stamp has no parsable latency, so it counts as slow
        assert_eq!(
            strip_latency_prefix("20240825 12:00,http://version.example.com/v", 2000.0),
            None
        );
        // blank and plain lines
        assert_eq!(strip_latency_prefix("", 2000.0), None);
        assert_eq!(strip_latency_prefix("CCTV1", 2000.0), None);
    }

    #[test]
    fn test_classify_line_normalizes_before_matching() {
        let catalog = Catalog::from_categories(vec![Category::new(
            "央视频道",
            vec!["CCTV1".to_string()],
        )]);
        let config = Config::default();
        let mut engine =
            ClassificationEngine::new(catalog, Blacklist::default(), &config.limits);
        let normalizer = NameNormalizer::new(&CleaningConfig::default(), CorrectionMap::default());

        classify_line(&mut engine, &normalizer, "CCTV-1 高清,http://a/1");
        classify_line(&mut engine, &normalizer, "央视频道,#genre#");

        let lines = engine.category_lines("央视频道");
        assert_eq!(lines, [ChannelLine::new("CCTV1", "http://a/1")]);
    }

    #[test]
    fn test_variant_spellings_collapse_to_one_record() {
        let catalog = Catalog::from_categories(vec![Category::new(
            "央视频道",
            vec!["CCTV1".to_string()],
        )]);
        let config = Config::default();
        let mut engine =
            ClassificationEngine::new(catalog, Blacklist::default(), &config.limits);
        let normalizer = NameNormalizer::new(&CleaningConfig::default(), CorrectionMap::default());

        classify_line(&mut engine, &normalizer, "CCTV-1 高清,http://a/1");
        classify_line(&mut engine, &normalizer, "CCTV1「IPV6」,http://a/1");

        assert_eq!(
            engine.category_lines("央视频道"),
            [ChannelLine::new("CCTV1", "http://a/1")]
        );
    }

    #[test]
    fn test_assemble_lists_shapes_blocks() {
        let mut config = Config::default();
        config.categories.ordered = vec!["央视频道".to_string()];
        config.categories.lite = vec!["央视频道".to_string()];
        config.categories.full_extra = vec!["港澳台".to_string()];

        let catalog = Catalog::from_categories(vec![
            Category::new(
                "央视频道",
                vec!["CCTV1".to_string(), "CCTV2".to_string()],
            ),
            Category::new("港澳台", vec!["翡翠台".to_string()]),
        ]);
        let mut engine =
            ClassificationEngine::new(catalog, Blacklist::default(), &config.limits);
        engine.classify(&ChannelLine::new("CCTV2", "http://a/2"));
        engine.classify(&ChannelLine::new("CCTV1", "http://a/1"));
        engine.classify(&ChannelLine::new("翡翠台", "http://a/3"));

        let ordering = OrderingEngine::new(&config.categories.ordered).unwrap();
        let (full, lite) = assemble_lists(&engine, &ordering, &config);

        assert_eq!(lite[0], "更新时间,#genre#");
        assert!(lite[1].ends_with(&config.playlist.version_stream_url));
        assert_eq!(lite[2], "");
        assert_eq!(lite[3], "央视频道,#genre#");
        // dictionary order, not arrival order
        assert_eq!(lite[4], "CCTV1,http://a/1");
        assert_eq!(lite[5], "CCTV2,http://a/2");
        assert_eq!(lite.len(), 6);

        assert_eq!(full[..6], lite[..]);
        assert_eq!(full[6], "");
        assert_eq!(full[7], "港澳台,#genre#");
        assert_eq!(full[8], "翡翠台,http://a/3");
        assert_eq!(full.len(), 9);
    }
}
