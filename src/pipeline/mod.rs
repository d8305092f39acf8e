//! Pipeline entry points for list operations.
//!
//! - `run_audit`: probe harvested candidates and refresh the auto lists
//! - `run_build`: aggregate whitelists and remote sources into live lists
//! - `run_pipeline`: audit then build

pub mod audit;
pub mod build;
pub mod pipeline;

pub use audit::{AuditStats, run_audit};
pub use build::{BuildStats, run_build};
pub use pipeline::run_pipeline;

use chrono::{Duration, Utc};

use crate::models::PlaylistConfig;
use crate::storage::ListStorage;

/// `YYYYMMDD HH:MM,<stream-url>` stamp, clock shifted to UTC+8.
pub(crate) fn version_line(playlist: &PlaylistConfig) -> String {
    let stamp = (Utc::now() + Duration::hours(8)).format("%Y%m%d %H:%M");
    format!("{},{}", stamp, playlist.version_stream_url)
}

/// Shared list header: update-time marker, version line, blank separator.
pub(crate) fn list_header(playlist: &PlaylistConfig) -> Vec<String> {
    vec![
        "更新时间,#genre#".to_string(),
        version_line(playlist),
        String::new(),
    ]
}

/// Write a line artifact, reporting failure without aborting the run.
pub(crate) async fn write_or_report(storage: &dyn ListStorage, key: &str, lines: &[String]) {
    match storage.write_lines(key, lines).await {
        Ok(()) => log::info!("Wrote {} ({} lines)", key, lines.len()),
        Err(e) => log::error!("Failed to write {}: {}", key, e),
    }
}

/// Write a text artifact, reporting failure without aborting the run.
pub(crate) async fn write_text_or_report(storage: &dyn ListStorage, key: &str, text: &str) {
    match storage.write_text(key, text).await {
        Ok(()) => log::info!("Wrote {}", key),
        Err(e) => log::error!("Failed to write {}: {}", key, e),
    }
}
