// src/fetch/mod.rs

use anyhow::Result;
use scraper::Html;
use tracing::warn;
use url::Url;

use crate::error::ScrapeError;

pub mod cache;
pub mod http;

pub use cache::DiskCache;
pub use http::HttpFetcher;

/// Source of page bodies. The crawlers only talk to this, so a run can be
/// replayed against canned pages.
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    async fn get_text(&self, url: &Url) -> Result<String>;

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Fetch and parse `url`, or `None` if the page is unreachable.
///
/// Failures are logged here; whether they end the run is up to the caller.
pub async fn fetch_document<F: Fetcher>(fetcher: &F, url: &Url) -> Option<Html> {
    match fetcher.get_text(url).await {
        Ok(body) => Some(Html::parse_document(&body)),
        Err(e) => {
            warn!(%url, error = %e, "no response");
            None
        }
    }
}

/// Like [`fetch_document`], for pages the whole run depends on.
pub async fn require_document<F: Fetcher>(fetcher: &F, url: &Url) -> Result<Html, ScrapeError> {
    fetch_document(fetcher, url)
        .await
        .ok_or_else(|| ScrapeError::Response {
            url: url.to_string(),
        })
}
