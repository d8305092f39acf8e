// src/services/prober.rs

//! Concurrent liveness probing over a candidate list.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::models::{ChannelLine, Config};
use crate::services::protocols::{ProbeDispatch, ProtocolProbe};
use crate::utils::url::{host_of, normalize_percent_encoding};

/// Latency stamped on whitelisted lines whose probe failed, so they rank
/// ahead of every measured line instead of being dropped.
pub const WHITELIST_FALLBACK_MS: f64 = 0.01;

/// Host-keyed counts of failed probes, collected across a batch.
#[derive(Debug, Default)]
pub struct FailureTracker {
    counts: Mutex<HashMap<String, u32>>,
}

impl FailureTracker {
    pub fn record(&self, url: &str) {
        let Some(host) = host_of(url) else {
            return;
        };
        if let Ok(mut counts) = self.counts.lock() {
            *counts.entry(host).or_insert(0) += 1;
        }
    }

    /// Hosts with the most failures, descending, ties broken by name.
    pub fn top_offenders(&self, limit: usize) -> Vec<(String, u32)> {
        let Ok(counts) = self.counts.lock() else {
            return Vec::new();
        };
        let mut entries: Vec<(String, u32)> = counts.iter().map(|(h, c)| (h.clone(), *c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }

    pub fn total(&self) -> u32 {
        self.counts
            .lock()
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }
}

/// Result of probing one batch.
#[derive(Debug, Default)]
pub struct ProbeBatchOutcome {
    /// Lines that count as alive, with their latency in milliseconds,
    /// ascending. Whitelisted failures carry [`WHITELIST_FALLBACK_MS`].
    pub ranked: Vec<(f64, ChannelLine)>,
    /// Dead lines, sorted lexicographically for stable diffs.
    pub failed: Vec<ChannelLine>,
}

/// Probes candidate lines through a bounded worker pool and splits them
/// into ranked and failed sets.
pub struct Prober {
    checker: Arc<dyn ProtocolProbe>,
    timeout: Duration,
    max_concurrent: usize,
    failures: FailureTracker,
}

impl Prober {
    pub fn new(config: &Config) -> Result<Self> {
        let dispatch = ProbeDispatch::new(&config.probe, &config.fetch.user_agent)?;
        Ok(Self::with_checker(
            Arc::new(dispatch),
            Duration::from_secs(config.probe.timeout_secs),
            config.probe.max_concurrent,
        ))
    }

    pub fn with_checker(
        checker: Arc<dyn ProtocolProbe>,
        timeout: Duration,
        max_concurrent: usize,
    ) -> Self {
        Self {
            checker,
            timeout,
            max_concurrent,
            failures: FailureTracker::default(),
        }
    }

    pub fn failures(&self) -> &FailureTracker {
        &self.failures
    }

    /// Probe every line, at most `max_concurrent` at a time.
    ///
    /// Whitelisted URLs that fail are kept with the sentinel latency; other
    /// failures go to `failed` and feed the failure tracker. Ranked order is
    /// ascending latency with completion order breaking ties.
    pub async fn probe_batch(
        &self,
        lines: Vec<ChannelLine>,
        whitelist: &HashSet<String>,
    ) -> ProbeBatchOutcome {
        let total = lines.len();
        let concurrency = self.max_concurrent.max(1);
        log::info!("Probing {} candidates ({} workers)", total, concurrency);

        let mut ranked: Vec<(f64, ChannelLine)> = Vec::new();
        let mut failed: Vec<ChannelLine> = Vec::new();

        let mut results = stream::iter(lines)
            .map(|line| async move {
                let elapsed = self.probe_one(&line.url).await;
                (line, elapsed)
            })
            .buffer_unordered(concurrency);

        let mut completed = 0usize;
        while let Some((line, elapsed)) = results.next().await {
            completed += 1;
            if completed % 100 == 0 {
                log::info!("Probed {}/{}", completed, total);
            }
            match elapsed {
                Some(ms) => {
                    log::debug!("Alive ({:.2}ms): {}", ms, line.url);
                    ranked.push((ms, line));
                }
                None => {
                    self.failures.record(&line.url);
                    if whitelist.contains(&line.url) {
                        ranked.push((WHITELIST_FALLBACK_MS, line));
                    } else {
                        failed.push(line);
                    }
                }
            }
        }

        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        failed.sort_by_cached_key(|line| line.to_string());

        log::info!(
            "Probe batch done: {} ranked, {} failed",
            ranked.len(),
            failed.len()
        );
        ProbeBatchOutcome { ranked, failed }
    }

    /// One probe attempt. Percent-normalization happens before the clock
    /// starts, so the reported latency is the network wait alone.
    async fn probe_one(&self, url: &str) -> Option<f64> {
        let normalized = normalize_percent_encoding(url);
        let start = Instant::now();
        if self.checker.check(&normalized, self.timeout).await {
            Some(start.elapsed().as_secs_f64() * 1000.0)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Scripted checker: url -> (alive, artificial delay in ms).
    struct StubProbe {
        outcomes: HashMap<String, (bool, u64)>,
    }

    impl StubProbe {
        fn new(outcomes: &[(&str, bool, u64)]) -> Self {
            Self {
                outcomes: outcomes
                    .iter()
                    .map(|(url, alive, ms)| (url.to_string(), (*alive, *ms)))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl ProtocolProbe for StubProbe {
        async fn check(&self, url: &str, _limit: Duration) -> bool {
            match self.outcomes.get(url) {
                Some((alive, delay_ms)) => {
                    tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                    *alive
                }
                None => false,
            }
        }
    }

    fn line(name: &str, url: &str) -> ChannelLine {
        ChannelLine::new(name, url)
    }

    fn prober_with(stub: StubProbe, workers: usize) -> Prober {
        Prober::with_checker(Arc::new(stub), Duration::from_secs(2), workers)
    }

    #[tokio::test]
    async fn test_ranked_ascending_by_latency() {
        let stub = StubProbe::new(&[
            ("http://slow/1", true, 80),
            ("http://fast/1", true, 10),
            ("http://mid/1", true, 40),
        ]);
        let prober = prober_with(stub, 3);
        let outcome = prober
            .probe_batch(
                vec![
                    line("慢台", "http://slow/1"),
                    line("快台", "http://fast/1"),
                    line("中台", "http://mid/1"),
                ],
                &HashSet::new(),
            )
            .await;

        assert!(outcome.failed.is_empty());
        let urls: Vec<&str> = outcome.ranked.iter().map(|(_, l)| l.url.as_str()).collect();
        assert_eq!(urls, ["http://fast/1", "http://mid/1", "http://slow/1"]);
        // measured latency reflects the real wait
        assert!(outcome.ranked[0].0 >= 10.0);
        assert!(outcome.ranked[0].0 < outcome.ranked[2].0);
    }

    #[tokio::test]
    async fn test_whitelisted_failure_gets_sentinel_rank() {
        let stub = StubProbe::new(&[
            ("http://alive/1", true, 20),
            ("http://dead-vip/1", false, 5),
            ("http://dead/1", false, 5),
        ]);
        let prober = prober_with(stub, 2);
        let whitelist: HashSet<String> = ["http://dead-vip/1".to_string()].into_iter().collect();
        let outcome = prober
            .probe_batch(
                vec![
                    line("活台", "http://alive/1"),
                    line("保底台", "http://dead-vip/1"),
                    line("死台", "http://dead/1"),
                ],
                &whitelist,
            )
            .await;

        // sentinel sorts ahead of every measured latency
        assert_eq!(outcome.ranked[0].1.url, "http://dead-vip/1");
        assert_eq!(outcome.ranked[0].0, WHITELIST_FALLBACK_MS);
        assert_eq!(outcome.ranked[1].1.url, "http://alive/1");
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].url, "http://dead/1");
    }

    #[tokio::test]
    async fn test_failed_lines_sorted_lexicographically() {
        let stub = StubProbe::new(&[
            ("http://x/b", false, 30),
            ("http://x/a", false, 5),
        ]);
        let prober = prober_with(stub, 2);
        let outcome = prober
            .probe_batch(
                vec![line("乙", "http://x/b"), line("甲", "http://x/a")],
                &HashSet::new(),
            )
            .await;

        let rendered: Vec<String> = outcome.failed.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["乙,http://x/b", "甲,http://x/a"]);
    }

    #[tokio::test]
    async fn test_failures_are_tracked_per_host() {
        let stub = StubProbe::new(&[
            ("http://bad.example.com/1", false, 1),
            ("http://bad.example.com/2", false, 1),
            ("http://ok.example.com/1", true, 1),
        ]);
        let prober = prober_with(stub, 3);
        let _ = prober
            .probe_batch(
                vec![
                    line("a", "http://bad.example.com/1"),
                    line("b", "http://bad.example.com/2"),
                    line("c", "http://ok.example.com/1"),
                ],
                &HashSet::new(),
            )
            .await;

        let offenders = prober.failures().top_offenders(5);
        assert_eq!(offenders, vec![("bad.example.com".to_string(), 2)]);
        assert_eq!(prober.failures().total(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let prober = prober_with(StubProbe::new(&[]), 4);
        let outcome = prober.probe_batch(Vec::new(), &HashSet::new()).await;
        assert!(outcome.ranked.is_empty());
        assert!(outcome.failed.is_empty());
    }
}
