// src/crawl/latest_versions.rs

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::{info, instrument};

use crate::config::Settings;
use crate::error::ScrapeError;
use crate::fetch::{require_document, Fetcher};
use crate::html::{find_all, find_tag, text_of};
use crate::output::Table;

pub const HEADER: [&str; 3] = ["Ссылка на документацию", "Версия", "Статус"];

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)").expect("version pattern is valid")
});

/// `"Python 3.13 (stable)"` → `("3.13", "stable")`; anything else is kept
/// whole as the version with an empty status.
pub fn split_version(text: &str) -> (String, String) {
    match VERSION_PATTERN.captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}

fn version_rows(doc: &Html) -> Result<Vec<Vec<String>>, ScrapeError> {
    let sidebar = find_tag(doc.root_element(), "div", &[("class", "sphinxsidebarwrapper")])?;
    let list = find_all(sidebar, "ul", &[])?
        .into_iter()
        .find(|ul| text_of(*ul).contains("All versions"))
        .ok_or(ScrapeError::VersionsNotFound)?;

    let mut rows = Vec::new();
    for a in find_all(list, "a", &[])? {
        let link = a.value().attr("href").unwrap_or_default().to_string();
        let (version, status) = split_version(&text_of(a));
        rows.push(vec![link, version, status]);
    }
    Ok(rows)
}

#[instrument(level = "info", skip_all)]
pub async fn latest_versions<F: Fetcher>(fetcher: &F, settings: &Settings) -> Result<Table> {
    let doc = require_document(fetcher, &settings.main_doc_url).await?;
    let rows = version_rows(&doc)?;
    info!(versions = rows.len(), "collected versions");
    Ok(Table::new(HEADER, rows))
}
