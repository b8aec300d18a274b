use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Serialize, Deserialize)]
pub struct CachedResponse {
    pub url: String,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
}

/// Persistent response cache: one JSON file per URL, named after the URL's
/// SHA-256. Entries never expire on their own, only [`HttpCache::clear`]
/// removes them.
#[derive(Debug)]
pub struct HttpCache {
    dir: PathBuf,
}

impl HttpCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        self.dir.join(format!("{:x}.json", hasher.finalize()))
    }

    /// A broken entry counts as a miss; it gets overwritten on the next store.
    pub async fn get(&self, url: &str) -> Option<CachedResponse> {
        let path = self.entry_path(url);
        let raw = tokio::fs::read(&path).await.ok()?;
        match serde_json::from_slice::<CachedResponse>(&raw) {
            Ok(entry) if entry.url == url => {
                debug!("Cache hit for {url}");
                Some(entry)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring unreadable cache entry {}: {e}", path.display());
                None
            }
        }
    }

    pub async fn store(&self, url: &str, body: &str) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create cache dir {}", self.dir.display()))?;
        let entry = CachedResponse {
            url: url.to_string(),
            body: body.to_string(),
            fetched_at: Utc::now(),
        };
        let path = self.entry_path(url);
        tokio::fs::write(&path, serde_json::to_vec(&entry)?)
            .await
            .with_context(|| format!("failed to write cache entry {}", path.display()))?;
        Ok(())
    }

    /// Drops every cached response.
    pub async fn clear(&self) -> anyhow::Result<()> {
        match tokio::fs::remove_dir_all(&self.dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("failed to clear cache dir {}", self.dir.display())),
        }
    }
}
