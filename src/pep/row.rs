// src/pep/row.rs

use scraper::{ElementRef, Html};
use url::Url;

use crate::error::ScrapeError;
use crate::html::{find_all, find_optional, text_of};

/// One index row that points at a detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PepRow {
    pub detail_link: Url,
    pub expected_status: String,
}

/// What a single index row turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Valid(PepRow),
    /// Empty or incomplete row; not a PEP.
    Skip,
    /// Looks like a PEP row but the status marker cannot be read.
    Malformed(String),
}

/// `"Standards Track, Draft"` → `"Draft"`.
pub fn status_from_title(title: &str) -> Option<&str> {
    let status = title.split(", ").nth(1)?.trim();
    (!status.is_empty()).then_some(status)
}

/// Classify one `<tr>`; `base` resolves relative detail links.
pub fn extract_row(row: ElementRef<'_>, base: &Url) -> Result<RowOutcome, ScrapeError> {
    let cells = find_all(row, "td", &[])?;
    if cells.len() < 3 || text_of(cells[0]).trim().is_empty() {
        return Ok(RowOutcome::Skip);
    }

    let link = find_optional(cells[1], "a", &[])?.and_then(|a| a.value().attr("href"));
    let marker = find_optional(cells[0], "abbr", &[])?;
    let (Some(href), Some(marker)) = (link, marker) else {
        return Ok(RowOutcome::Skip);
    };

    let detail_link = match base.join(href) {
        Ok(u) => u,
        Err(e) => return Ok(RowOutcome::Malformed(format!("bad link {:?}: {}", href, e))),
    };
    let title = marker.value().attr("title").unwrap_or_default();
    let Some(expected) = status_from_title(title) else {
        return Ok(RowOutcome::Malformed(format!(
            "unreadable status title {:?} for {}",
            title, detail_link
        )));
    };

    Ok(RowOutcome::Valid(PepRow {
        detail_link,
        expected_status: expected.to_string(),
    }))
}

/// Every data row of every table in `doc`, in document order.
/// The first `<tr>` of each table is its header and is dropped.
pub fn collect_rows(doc: &Html, base: &Url) -> Result<Vec<RowOutcome>, ScrapeError> {
    let mut out = Vec::new();
    for table in find_all(doc.root_element(), "table", &[])? {
        for row in find_all(table, "tr", &[])?.into_iter().skip(1) {
            out.push(extract_row(row, base)?);
        }
    }
    Ok(out)
}
