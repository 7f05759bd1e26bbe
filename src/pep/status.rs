// src/pep/status.rs

use scraper::{ElementRef, Html};
use url::Url;

use crate::fetch::{fetch_document, Fetcher};

/// Status field of a PEP page: the first `dd` after the first text node that
/// reads exactly `Status`. A blank `dd` counts as no status.
pub fn page_status(doc: &Html) -> Option<String> {
    let mut nodes = doc.tree.root().descendants();
    nodes.find(|node| node.value().as_text().is_some_and(|t| &**t == "Status"))?;
    let dd = nodes
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "dd")?;
    let status = dd.text().collect::<String>().trim().to_string();
    (!status.is_empty()).then_some(status)
}

/// Authoritative status of the PEP at `url`, or `None` when the page is
/// unreachable or has no status field.
pub async fn fetch_actual_status<F: Fetcher>(fetcher: &F, url: &Url) -> Option<String> {
    let doc = fetch_document(fetcher, url).await?;
    page_status(&doc)
}
