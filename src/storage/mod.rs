//! Storage abstractions for list artifacts.
//!
//! Every artifact an audit or build run produces goes through
//! [`ListStorage`], so the pipelines stay independent of where files land.
//!
//! ## Artifact Layout
//!
//! ```text
//! {root}/
//! ├── assets/
//! │   └── whitelist-blacklist/
//! │       ├── whitelist_auto.txt     # ranked probe survivors
//! │       ├── whitelist_auto_tv.txt  # player-ready variant
//! │       └── blacklist_auto.txt     # probe failures
//! └── dist/
//!     ├── live.txt / live_lite.txt   # aggregated text lists
//!     ├── live.m3u / live_lite.m3u   # rendered playlists
//!     ├── others.txt                 # unmatched records per source
//!     └── audit_stats.json / build_stats.json
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for list artifact backends.
#[async_trait]
pub trait ListStorage: Send + Sync {
    /// Write lines as a text document, one per line, with a trailing newline.
    async fn write_lines(&self, key: &str, lines: &[String]) -> Result<()>;

    /// Write a complete text document as-is.
    async fn write_text(&self, key: &str, text: &str) -> Result<()>;

    /// Read a text document, `None` when the key does not exist.
    async fn read_text(&self, key: &str) -> Result<Option<String>>;
}
