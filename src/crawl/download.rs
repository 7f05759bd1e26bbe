// src/crawl/download.rs

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

use crate::config::Settings;
use crate::error::ScrapeError;
use crate::fetch::{require_document, Fetcher};
use crate::html::{find_all, find_tag};

static PDF_A4_ZIP: Lazy<Regex> = Lazy::new(|| Regex::new(r".+pdf-a4\.zip$").expect("archive pattern is valid"));

/// Absolute URL of the A4 PDF archive listed on the downloads page.
fn archive_url(doc: &Html, base: &Url) -> Result<Url> {
    let main = find_tag(doc.root_element(), "div", &[("role", "main")])?;
    let table = find_tag(main, "table", &[("class", "docutils")])?;
    let href = find_all(table, "a", &[])?
        .into_iter()
        .filter_map(|a| a.value().attr("href"))
        .find(|href| PDF_A4_ZIP.is_match(href))
        .ok_or_else(|| ScrapeError::TagNotFound {
            tag: "a".to_string(),
            attrs: format!("href=/{}/", PDF_A4_ZIP.as_str()),
        })?;
    base.join(href)
        .with_context(|| format!("joining {} onto {}", href, base))
}

fn archive_filename(url: &Url) -> &str {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .unwrap_or("docs-pdf-a4.zip")
}

/// Save the documentation archive under `downloads/`; returns the saved path.
#[instrument(level = "info", skip_all)]
pub async fn download<F: Fetcher>(fetcher: &F, settings: &Settings) -> Result<PathBuf> {
    let downloads_url = settings.main_doc_url.join("download.html")?;
    let archive = {
        let doc = require_document(fetcher, &downloads_url).await?;
        archive_url(&doc, &downloads_url)?
    };

    let downloads_dir = settings.downloads_dir();
    fs::create_dir_all(&downloads_dir)
        .await
        .with_context(|| format!("creating {:?}", &downloads_dir))?;
    let archive_path = downloads_dir.join(archive_filename(&archive));

    let bytes = fetcher
        .get_bytes(&archive)
        .await
        .with_context(|| format!("downloading {}", archive))?;
    fs::write(&archive_path, &bytes)
        .await
        .with_context(|| format!("writing {:?}", &archive_path))?;

    info!(path = %archive_path.display(), bytes = bytes.len(), "archive saved");
    Ok(archive_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;
    use tempfile::tempdir;

    const DOWNLOADS: &str = r#"
        <div class="body" role="main">
          <h1>Download Python 3.13 Documentation</h1>
          <table class="docutils align-default">
            <tr><th>Format</th><th>Packed as .zip</th></tr>
            <tr><td>PDF (US-Letter paper size)</td>
                <td><a href="archives/python-3.13-docs-pdf-letter.zip">Download</a></td></tr>
            <tr><td>PDF (A4 paper size)</td>
                <td><a href="archives/python-3.13-docs-pdf-a4.zip">Download</a></td></tr>
          </table>
        </div>"#;

    fn settings(base: &std::path::Path) -> Settings {
        Settings::new(
            Url::parse("https://docs.python.org/3/").unwrap(),
            Url::parse("https://peps.python.org/").unwrap(),
            base.to_path_buf(),
        )
    }

    #[tokio::test]
    async fn test_download_saves_a4_archive() {
        let tmp = tempdir().unwrap();
        let fetcher = StaticFetcher::new()
            .with_page("https://docs.python.org/3/download.html", DOWNLOADS)
            .with_page(
                "https://docs.python.org/3/archives/python-3.13-docs-pdf-a4.zip",
                "PK-zip-bytes",
            );

        let path = download(&fetcher, &settings(tmp.path())).await.unwrap();

        assert_eq!(path, tmp.path().join("downloads/python-3.13-docs-pdf-a4.zip"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK-zip-bytes");

        // Second run reuses the existing directory and overwrites the file.
        let again = download(&fetcher, &settings(tmp.path())).await.unwrap();
        assert_eq!(again, path);
    }

    #[tokio::test]
    async fn test_missing_archive_link() {
        let tmp = tempdir().unwrap();
        let fetcher = StaticFetcher::new().with_page(
            "https://docs.python.org/3/download.html",
            r#"<div role="main"><table class="docutils"><tr><td>none</td></tr></table></div>"#,
        );
        let err = download(&fetcher, &settings(tmp.path())).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScrapeError>(),
            Some(ScrapeError::TagNotFound { .. })
        ));
        assert!(!tmp.path().join("downloads").exists());
    }
}
