//! Filesystem-backed storage for list artifacts.
//!
//! Keys are paths relative to a root directory, e.g. `dist/live.txt` or
//! `assets/whitelist-blacklist/whitelist_auto.txt`. Readers may be watching
//! the output files, so every write lands via a sibling tmp file and a
//! rename rather than truncating in place.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::ListStorage;

/// Stores list artifacts under a root directory on local disk.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Resolve a storage key to its on-disk path.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Replace the file at `key` in one step: tmp file first, then rename.
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl ListStorage for LocalStorage {
    async fn write_lines(&self, key: &str, lines: &[String]) -> Result<()> {
        let mut text = lines.join("\n");
        text.push('\n');
        self.write_bytes(key, text.as_bytes()).await
    }

    async fn write_text(&self, key: &str, text: &str) -> Result<()> {
        self.write_bytes(key, text.as_bytes()).await
    }

    async fn read_text(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_text_round_trips() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_text("live.txt", "hello\n").await.unwrap();
        let text = storage.read_text("live.txt").await.unwrap();
        assert_eq!(text, Some("hello\n".to_string()));
    }

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let text = storage.read_text("nope.txt").await.unwrap();
        assert!(text.is_none());
    }

    #[tokio::test]
    async fn test_write_lines_joins_with_trailing_newline() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let lines = vec![
            "央视频道,#genre#".to_string(),
            "CCTV1,http://example.com/1.m3u8".to_string(),
        ];
        storage.write_lines("dist/live.txt", &lines).await.unwrap();

        let text = storage.read_text("dist/live.txt").await.unwrap().unwrap();
        assert_eq!(text, "央视频道,#genre#\nCCTV1,http://example.com/1.m3u8\n");
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage
            .write_text("assets/whitelist-blacklist/whitelist_auto.txt", "x\n")
            .await
            .unwrap();
        assert!(tmp
            .path()
            .join("assets/whitelist-blacklist/whitelist_auto.txt")
            .exists());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_text("live.txt", "first\n").await.unwrap();
        storage.write_text("live.txt", "second\n").await.unwrap();
        let text = storage.read_text("live.txt").await.unwrap();
        assert_eq!(text, Some("second\n".to_string()));
    }
}
