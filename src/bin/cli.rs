//! tvforge CLI
//!
//! Local execution entry point for the audit and build pipelines.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tvforge::{
    error::Result,
    models::{Catalog, Config, CorrectionMap},
    pipeline,
    storage::LocalStorage,
};

/// tvforge - IPTV source prober and live-list builder
#[derive(Parser, Debug)]
#[command(
    name = "tvforge",
    version,
    about = "Probes IPTV sources and aggregates them into live lists"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured assets directory
    #[arg(long)]
    assets_dir: Option<String>,

    /// Override the configured output directory
    #[arg(long)]
    output_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe remote sources and refresh the auto whitelist/blacklist
    Audit,

    /// Aggregate whitelists and sources into live lists and playlists
    Build,

    /// Run full pipeline: Audit → Build
    Pipeline,

    /// Validate configuration and category dictionaries
    Validate,

    /// Show current output artifact info
    Info,
}

/// Configure logging from the verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("tvforge starting...");

    let mut config = Config::load_or_default(&cli.config);
    if let Some(assets_dir) = cli.assets_dir {
        config.paths.assets_dir = assets_dir;
    }
    if let Some(output_dir) = cli.output_dir {
        config.paths.output_dir = output_dir;
    }

    let storage = LocalStorage::new(".");

    match cli.command {
        Command::Audit => {
            let stats = pipeline::run_audit(&config, &storage).await?;
            log::info!(
                "Audit complete: {} alive, {} failed out of {} candidates",
                stats.alive_count,
                stats.failed_count,
                stats.candidate_count
            );
        }

        Command::Build => {
            let stats = pipeline::run_build(&config, &storage).await?;
            log::info!(
                "Build complete: live.txt {} lines, live_lite.txt {} lines",
                stats.live_line_count,
                stats.lite_line_count
            );
        }

        Command::Pipeline => {
            pipeline::run_pipeline(&config, &storage).await?;
        }

        Command::Validate => {
            log::info!("Checking configuration and dictionaries...");

            if let Err(e) = config.validate() {
                log::error!("Configuration invalid: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK ({} main, {} regional categories)",
                config.categories.main.len(),
                config.categories.regional.len()
            );

            let catalog = Catalog::load(&config.categories, &config.paths);
            let empty = catalog
                .categories
                .iter()
                .filter(|c| c.is_empty())
                .map(|c| c.label.as_str())
                .collect::<Vec<_>>();
            if empty.is_empty() {
                log::info!("✓ Dictionaries OK ({} categories loaded)", catalog.categories.len());
            } else {
                log::warn!("Empty category dictionaries: {}", empty.join(", "));
            }

            let corrections = CorrectionMap::load(&config.paths.corrections_file());
            log::info!("✓ Corrections OK ({} rules)", corrections.len());

            log::info!("All checks passed");
        }

        Command::Info => {
            log::info!("Assets directory: {}", config.paths.assets_dir);
            log::info!("Output directory: {}", config.paths.output_dir);

            for key in ["audit_stats.json", "build_stats.json"] {
                let path = config.paths.output(key);
                if let Ok(content) = std::fs::read_to_string(&path) {
                    if let Ok(stats) = serde_json::from_str::<serde_json::Value>(&content) {
                        log::info!("{}:", key);
                        if let Some(finished) = stats.get("finished_at") {
                            log::info!("  finished at: {}", finished);
                        }
                        if let Some(alive) = stats.get("alive_count") {
                            log::info!("  alive sources: {}", alive);
                        }
                        if let Some(live) = stats.get("live_line_count") {
                            log::info!("  live.txt lines: {}", live);
                        }
                    }
                } else {
                    log::info!("{}: not found", key);
                }
            }

            let live_path = config.paths.output("live.txt");
            if std::path::Path::new(&live_path).exists() {
                log::info!("live.txt: exists");
            } else {
                log::info!("live.txt: not generated yet");
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
