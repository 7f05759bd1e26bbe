// src/pep/reconcile.rs

use tracing::{debug, warn};
use url::Url;

use super::row::RowOutcome;
use super::status::fetch_actual_status;
use crate::config::is_recognized_status;
use crate::fetch::Fetcher;

/// Status → count, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, usize)>,
}

impl Tally {
    pub fn increment(&mut self, status: &str) {
        match self.entries.iter_mut().find(|(s, _)| s == status) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((status.to_string(), 1)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(s, c)| (s.as_str(), *c))
    }
}

/// A PEP whose index status disagrees with its own page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchRecord {
    pub link: Url,
    pub actual_status: String,
    pub expected_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub tally: Tally,
    /// Every valid row, whether or not its page yielded a status.
    pub total_peps: usize,
    pub mismatches: Vec<MismatchRecord>,
}

/// Fetch each valid row's detail page in order and compare statuses.
pub async fn reconcile<F: Fetcher>(rows: Vec<RowOutcome>, fetcher: &F) -> RunResult {
    let mut result = RunResult::default();
    let total_rows = rows.len();

    for (idx, outcome) in rows.into_iter().enumerate() {
        let row = match outcome {
            RowOutcome::Valid(row) => row,
            RowOutcome::Skip => continue,
            RowOutcome::Malformed(reason) => {
                warn!(row = idx, %reason, "skipping malformed row");
                continue;
            }
        };

        let actual = fetch_actual_status(fetcher, &row.detail_link).await;
        result.total_peps += 1;
        debug!(
            row = idx + 1,
            of = total_rows,
            link = %row.detail_link,
            actual = ?actual,
            expected = %row.expected_status,
            "checked"
        );

        let Some(actual) = actual else {
            continue;
        };
        if is_recognized_status(&actual) {
            result.tally.increment(&actual);
        }
        if actual != row.expected_status {
            result.mismatches.push(MismatchRecord {
                link: row.detail_link,
                actual_status: actual,
                expected_status: row.expected_status,
            });
        }
    }

    result
}

#[cfg(test)]
impl Tally {
    pub fn get(&self, status: &str) -> usize {
        self.entries
            .iter()
            .find(|(s, _)| s == status)
            .map_or(0, |(_, c)| *c)
    }

    pub fn sum(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
