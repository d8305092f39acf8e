// src/services/fetcher.rs

//! Downloads subscription sources and turns them into record lines.

use reqwest::Client;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::FetchConfig;
use crate::services::playlist;
use crate::utils::{decode_with_fallback, normalize_percent_encoding};

pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one source URL and returns its `name,url` record lines.
    ///
    /// M3U bodies are converted to plain records first; text bodies are
    /// split into trimmed non-empty lines as-is.
    pub async fn fetch_source(&self, url: &str) -> Result<Vec<String>> {
        let url = normalize_percent_encoding(url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        let (text, charset) = decode_with_fallback(&bytes)
            .ok_or_else(|| AppError::decode(&url, "no candidate charset decoded the body"))?;
        log::debug!("fetched {} ({} bytes, {})", url, bytes.len(), charset);

        let lines = if playlist::is_m3u(&text) {
            playlist::to_records(&text)
        } else {
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        };
        Ok(lines)
    }
}
