// src/pep/summary.rs

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use super::reconcile::RunResult;

pub const SUMMARY_FILE: &str = "pep_status.csv";
pub const SUMMARY_HEADER: [&str; 2] = ["Статус", "Количество"];

/// Log every mismatch as a link / actual / expected block.
pub fn log_mismatches(result: &RunResult) {
    if result.mismatches.is_empty() {
        return;
    }
    info!(count = result.mismatches.len(), "mismatched statuses:");
    for m in &result.mismatches {
        info!(
            "{}\nStatus on page: {}\nExpected status: {}",
            m.link, m.actual_status, m.expected_status
        );
    }
}

/// Overwrite `<results_dir>/pep_status.csv` with the tally and total.
pub fn save_status_summary(result: &RunResult, results_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(results_dir)
        .with_context(|| format!("creating results directory {:?}", results_dir))?;
    let path = results_dir.join(SUMMARY_FILE);

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&path)
        .with_context(|| format!("creating {:?}", &path))?;
    wtr.write_record(SUMMARY_HEADER)?;
    for (status, count) in result.tally.iter() {
        wtr.write_record([status, count.to_string().as_str()])?;
    }
    wtr.write_record(["Total", result.total_peps.to_string().as_str()])?;
    wtr.flush().with_context(|| format!("flushing {:?}", &path))?;

    info!(total = result.total_peps, "total PEPs");
    for (status, count) in result.tally.iter() {
        info!("{}: {}", status, count);
    }
    Ok(path)
}

/// Log mismatches, then write the summary file.
pub fn emit(result: &RunResult, results_dir: &Path) -> Result<PathBuf> {
    log_mismatches(result);
    save_status_summary(result, results_dir)
}
