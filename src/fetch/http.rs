// src/fetch/http.rs

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};
use url::Url;

use super::{cache::DiskCache, Fetcher};
use crate::config::HttpOptions;

/// `reqwest` client with retry/backoff and an optional disk cache for page bodies.
pub struct HttpFetcher {
    client: Client,
    cache: Option<DiskCache>,
    max_retries: u32,
    initial_backoff_ms: u64,
}

impl HttpFetcher {
    pub fn new(opts: &HttpOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(opts.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        let cache = match &opts.cache_dir {
            Some(dir) => Some(DiskCache::new(dir)?),
            None => None,
        };
        Ok(Self {
            client,
            cache,
            max_retries: opts.max_retries,
            initial_backoff_ms: opts.initial_backoff_ms,
        })
    }

    pub fn clear_cache(&self) -> Result<()> {
        match &self.cache {
            Some(cache) => cache.clear(),
            None => Ok(()),
        }
    }

    /// Pause before retry number `retry` (1-based); doubles each time.
    fn backoff(&self, retry: u32) -> Duration {
        Duration::from_millis(self.initial_backoff_ms << retry.saturating_sub(1).min(16))
    }

    async fn send(&self, url: &Url) -> Result<Response> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        resp.error_for_status()
            .with_context(|| format!("{} returned an error status", url))
    }

    async fn download_text(&self, url: &Url) -> Result<String> {
        let mut retry = 0;
        loop {
            debug!(%url, retry, "fetching");
            let err = match self.send(url).await {
                Ok(resp) => match resp.text().await {
                    Ok(body) => return Ok(body),
                    Err(e) => anyhow::Error::new(e).context(format!("reading body of {}", url)),
                },
                Err(e) => e,
            };
            if retry == self.max_retries {
                error!(%url, error = %err, "giving up after {} retries", retry);
                return Err(err);
            }
            retry += 1;
            let delay = self.backoff(retry);
            warn!(%url, retry, delay_ms = delay.as_millis() as u64, error = %err, "retrying");
            sleep(delay).await;
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn get_text(&self, url: &Url) -> Result<String> {
        if let Some(body) = self.cache.as_ref().and_then(|c| c.get(url)) {
            debug!(%url, "cache hit");
            return Ok(body);
        }
        let body = self.download_text(url).await?;
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(url, &body) {
                warn!(%url, error = %e, "could not cache response");
            }
        }
        Ok(body)
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        let bytes = self
            .send(url)
            .await?
            .bytes()
            .await
            .with_context(|| format!("reading body of {}", url))?;
        Ok(bytes.to_vec())
    }
}
