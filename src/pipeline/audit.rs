// src/pipeline/audit.rs

//! Probe run: harvest candidate lines from remote sources, probe them, and
//! refresh the auto whitelist/blacklist artifacts.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{ChannelLine, Config, PlaylistConfig};
use crate::services::{Prober, SourceFetcher};
use crate::storage::ListStorage;
use crate::utils::read_lines_or_warn;

use super::{list_header, write_or_report, write_text_or_report};

/// Harvest count for one fetched source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceStat {
    pub url: String,
    pub lines: usize,
}

/// Summary of one audit run, written to `audit_stats.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Sources fetched successfully, with their harvested line counts
    pub sources: Vec<SourceStat>,
    /// Record lines harvested across all sources
    pub harvested_lines: usize,
    /// Candidates left after multi-URL expansion and global URL dedup
    pub candidate_count: usize,
    pub alive_count: usize,
    pub failed_count: usize,
}

/// Run the audit: fetch every source, probe the candidates, and write the
/// ranked whitelist and sorted blacklist artifacts.
pub async fn run_audit(config: &Config, storage: &dyn ListStorage) -> Result<AuditStats> {
    let started_at = Utc::now();
    log::info!("Audit run starting");

    let sources: Vec<String> = read_lines_or_warn(config.paths.urls_file())
        .into_iter()
        .filter(|url| url.starts_with("http"))
        .collect();
    log::info!("Loaded {} source URLs", sources.len());

    let fetcher = SourceFetcher::new(&config.fetch)?;
    let mut harvested: Vec<String> = Vec::new();
    let mut source_stats: Vec<SourceStat> = Vec::new();
    for url in &sources {
        match fetcher.fetch_source(url).await {
            Ok(lines) => {
                log::info!("Source {}: {} lines", url, lines.len());
                source_stats.push(SourceStat {
                    url: url.clone(),
                    lines: lines.len(),
                });
                harvested.extend(lines);
            }
            Err(e) => log::warn!("Source {} skipped: {}", url, e),
        }
    }

    let candidates = prepare_candidates(&harvested);
    log::info!(
        "{} candidates after expansion and dedup ({} harvested lines)",
        candidates.len(),
        harvested.len()
    );

    let whitelist = load_whitelist_urls(&config.paths.whitelist_manual());
    let candidate_count = candidates.len();
    let prober = Prober::new(config)?;
    let outcome = prober.probe_batch(candidates, &whitelist).await;

    for (host, count) in prober.failures().top_offenders(5) {
        log::info!("Failing host {}: {} misses", host, count);
    }

    let ranked_records: Vec<String> = outcome
        .ranked
        .iter()
        .map(|(ms, line)| format!("{:.2}ms,{}", ms, line))
        .collect();
    let tv_records: Vec<String> = outcome
        .ranked
        .iter()
        .map(|(_, line)| line.to_string())
        .collect();
    let failed_records: Vec<String> = outcome
        .failed
        .iter()
        .map(|line| line.to_string())
        .collect();

    let whitelist_lines = artifact_lines(&config.playlist, "RespoTime,whitelist", ranked_records);
    let tv_lines = artifact_lines(&config.playlist, "whitelist", tv_records);
    let blacklist_lines = artifact_lines(&config.playlist, "blacklist", failed_records);

    write_or_report(storage, &config.paths.whitelist_auto(), &whitelist_lines).await;
    write_or_report(storage, &config.paths.whitelist_auto_tv(), &tv_lines).await;
    write_or_report(storage, &config.paths.blacklist_auto(), &blacklist_lines).await;

    let finished_at = Utc::now();
    let stats = AuditStats {
        started_at,
        finished_at,
        sources: source_stats,
        harvested_lines: harvested.len(),
        candidate_count,
        alive_count: outcome.ranked.len(),
        failed_count: outcome.failed.len(),
    };
    let json = serde_json::to_string_pretty(&stats)?;
    write_text_or_report(storage, &config.paths.output("audit_stats.json"), &json).await;

    let elapsed = finished_at - started_at;
    log::info!(
        "Audit done in {}m {}s: {} alive, {} failed",
        elapsed.num_seconds() / 60,
        elapsed.num_seconds() % 60,
        stats.alive_count,
        stats.failed_count
    );
    Ok(stats)
}

/// Expand `name,url1#url2` lines into one candidate per URL and drop
/// repeated URLs, first occurrence winning.
fn prepare_candidates(lines: &[String]) -> Vec<ChannelLine> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();
    for line in lines {
        for parsed in ChannelLine::expand(line) {
            if seen.insert(parsed.url.clone()) {
                candidates.push(parsed);
            }
        }
    }
    candidates
}

/// URL set that the prober must never blacklist.
fn load_whitelist_urls(path: &str) -> HashSet<String> {
    read_lines_or_warn(path)
        .iter()
        .flat_map(|line| ChannelLine::expand(line))
        .map(|line| line.url)
        .collect()
}

/// Header block plus a `section,#genre#` marker plus the records.
fn artifact_lines(
    playlist: &PlaylistConfig,
    section: &str,
    records: Vec<String>,
) -> Vec<String> {
    let mut lines = list_header(playlist);
    lines.push(format!("{},#genre#", section));
    lines.extend(records);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_candidates_expands_and_dedups() {
        let lines = vec![
            "CCTV1,http://a/1#http://a/2".to_string(),
            "CCTV1备用,http://a/1".to_string(),
            "央视频道,#genre#".to_string(),
            "not a record".to_string(),
        ];
        let candidates = prepare_candidates(&lines);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], ChannelLine::new("CCTV1", "http://a/1"));
        assert_eq!(candidates[1], ChannelLine::new("CCTV1", "http://a/2"));
    }

    #[test]
    fn test_artifact_lines_shape() {
        let playlist = PlaylistConfig::default();
        let lines = artifact_lines(
            &playlist,
            "RespoTime,whitelist",
            vec!["3.14ms,CCTV1,http://a/1".to_string()],
        );
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "更新时间,#genre#");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "RespoTime,whitelist,#genre#");
        assert_eq!(lines[4], "3.14ms,CCTV1,http://a/1");
    }

    #[tokio::test]
    async fn test_run_audit_without_sources_writes_empty_artifacts() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.assets_dir = tmp.path().join("assets").to_string_lossy().into_owned();
        config.paths.output_dir = tmp.path().join("dist").to_string_lossy().into_owned();

        let storage = LocalStorage::new(tmp.path());
        let stats = run_audit(&config, &storage).await.unwrap();

        assert!(stats.sources.is_empty());
        assert_eq!(stats.candidate_count, 0);

        let written = std::fs::read_to_string(
            tmp.path()
                .join(&config.paths.assets_dir)
                .join("whitelist-blacklist/whitelist_auto.txt"),
        )
        .unwrap();
        assert!(written.contains("RespoTime,whitelist,#genre#"));
        assert!(tmp
            .path()
            .join(&config.paths.output_dir)
            .join("audit_stats.json")
            .exists());
    }
}
