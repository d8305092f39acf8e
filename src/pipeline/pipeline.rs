// src/pipeline/pipeline.rs

//! Full run: audit then build.

use crate::error::Result;
use crate::models::Config;
use crate::storage::ListStorage;

use super::audit::run_audit;
use super::build::run_build;

/// Run the audit and then the build, so the build consumes the whitelist
/// and blacklist artifacts the audit just refreshed.
pub async fn run_pipeline(config: &Config, storage: &dyn ListStorage) -> Result<()> {
    log::info!("Step 1/2: Audit - probing candidate sources");
    let audit = run_audit(config, storage).await?;

    log::info!("Step 2/2: Build - aggregating live lists");
    let build = run_build(config, storage).await?;

    log::info!(
        "Pipeline complete: {} alive sources, live.txt {} lines",
        audit.alive_count,
        build.live_line_count
    );
    Ok(())
}
