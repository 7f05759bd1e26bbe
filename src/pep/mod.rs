// src/pep/mod.rs
//
// PEP index reconciliation: index rows → detail-page status → tally,
// total and mismatch list → pep_status.csv.

pub mod reconcile;
pub mod row;
pub mod status;
pub mod summary;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::Settings;
use crate::fetch::{require_document, Fetcher};
use crate::output::Table;

pub use reconcile::{reconcile, MismatchRecord, RunResult, Tally};
pub use row::{collect_rows, extract_row, PepRow, RowOutcome};
pub use status::{fetch_actual_status, page_status};

/// Run the whole pipeline against `settings.pep_url` and write the summary.
#[instrument(level = "info", skip_all, fields(index = %settings.pep_url))]
pub async fn run<F: Fetcher>(fetcher: &F, settings: &Settings) -> Result<RunResult> {
    let rows = {
        let doc = require_document(fetcher, &settings.pep_url).await?;
        collect_rows(&doc, &settings.pep_url)
            .with_context(|| format!("reading PEP tables from {}", settings.pep_url))?
    };
    info!(rows = rows.len(), "index rows collected");

    let result = reconcile(rows, fetcher).await;
    summary::emit(&result, &settings.results_dir())?;
    Ok(result)
}

/// `Status, Count` rows followed by the total, for the output renderer.
pub fn to_table(result: &RunResult) -> Table {
    let mut rows: Vec<Vec<String>> = result
        .tally
        .iter()
        .map(|(status, count)| vec![status.to_string(), count.to_string()])
        .collect();
    rows.push(vec!["Total".to_string(), result.total_peps.to_string()]);
    Table::new(["Status", "Count"], rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;
    use std::{fs, path::Path};
    use tempfile::tempdir;
    use url::Url;

    const INDEX: &str = r#"
        <html><body>
        <section id="numerical-index"><table>
          <thead><tr><th>Type</th><th>PEP</th><th>Title</th></tr></thead>
          <tbody>
            <tr><td><abbr title="Standards Track, Draft">SD</abbr></td>
                <td><a href="pep-0001/">1</a></td><td>A</td></tr>
            <tr><td></td><td><a href="pep-0002/">2</a></td><td>blank</td></tr>
            <tr><td><abbr title="Standards Track, Final">SF</abbr></td>
                <td><a href="pep-0003/">3</a></td><td>B</td></tr>
            <tr><td><abbr title="Informational, Active">IA</abbr></td>
                <td><a href="pep-0004/">4</a></td><td>unreachable</td></tr>
          </tbody>
        </table></section>
        </body></html>"#;

    fn settings(base: &Path) -> Settings {
        Settings::new(
            Url::parse("https://docs.python.org/3/").unwrap(),
            Url::parse("https://peps.python.org/").unwrap(),
            base.to_path_buf(),
        )
    }

    fn fetcher() -> StaticFetcher {
        StaticFetcher::new()
            .with_page("https://peps.python.org/", INDEX)
            .with_page(
                "https://peps.python.org/pep-0001/",
                "<dl><dt>Status</dt><dd> Draft </dd></dl>",
            )
            .with_page(
                "https://peps.python.org/pep-0003/",
                "<dl><dt>Status</dt><dd>Withdrawn</dd></dl>",
            )
    }

    #[tokio::test]
    async fn test_pipeline_end_to_end() {
        let tmp = tempdir().unwrap();
        let settings = settings(tmp.path());

        let result = run(&fetcher(), &settings).await.unwrap();

        assert_eq!(result.total_peps, 3);
        assert_eq!(result.tally.iter().collect::<Vec<_>>(), vec![("Draft", 1), ("Withdrawn", 1)]);
        assert_eq!(result.mismatches.len(), 1);
        assert_eq!(result.mismatches[0].link.as_str(), "https://peps.python.org/pep-0003/");
        assert_eq!(result.mismatches[0].actual_status, "Withdrawn");
        assert_eq!(result.mismatches[0].expected_status, "Final");

        let csv = fs::read_to_string(tmp.path().join("results/pep_status.csv")).unwrap();
        assert_eq!(csv, "Статус,Количество\nDraft,1\nWithdrawn,1\nTotal,3\n");

        let table = to_table(&result);
        assert_eq!(table.rows.last().unwrap(), &vec!["Total".to_string(), "3".to_string()]);
    }

    #[tokio::test]
    async fn test_pipeline_is_idempotent() {
        let tmp = tempdir().unwrap();
        let settings = settings(tmp.path());
        let path = tmp.path().join("results/pep_status.csv");

        let first = run(&fetcher(), &settings).await.unwrap();
        let first_bytes = fs::read(&path).unwrap();
        let second = run(&fetcher(), &settings).await.unwrap();
        let second_bytes = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
    }

    #[tokio::test]
    async fn test_unreachable_index_is_fatal() {
        let tmp = tempdir().unwrap();
        let err = run(&StaticFetcher::new(), &settings(tmp.path()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("https://peps.python.org/"));
        assert!(!tmp.path().join("results").exists());
    }
}
