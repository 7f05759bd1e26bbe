// src/fetch/cache.rs

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};
use url::Url;

/// Response bodies on disk, one file per URL named by its SHA-256.
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    /// Open the cache at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).with_context(|| format!("creating cache directory {:?}", &dir))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, url: &Url) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_str().as_bytes());
        self.dir.join(format!("{:x}.html", hasher.finalize()))
    }

    pub fn get(&self, url: &Url) -> Option<String> {
        let body = fs::read_to_string(self.entry_path(url)).ok()?;
        debug!(%url, "cache hit");
        Some(body)
    }

    pub fn put(&self, url: &Url, body: &str) -> Result<()> {
        let path = self.entry_path(url);
        fs::write(&path, body).with_context(|| format!("writing cache entry {:?}", &path))
    }

    /// Drop every cached response. The directory itself is recreated empty.
    pub fn clear(&self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)
                .with_context(|| format!("removing cache directory {:?}", &self.dir))?;
        }
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("recreating cache directory {:?}", &self.dir))?;
        info!(dir = %self.dir.display(), "cache cleared");
        Ok(())
    }
}
