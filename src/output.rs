// src/output.rs

use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use prettytable::{format, Cell, Row, Table as PrettyTable};
use tracing::info;

use crate::cli::OutputKind;

const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Header plus rows, as produced by every crawler that returns results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<H, S>(header: H, rows: Vec<Vec<String>>) -> Self
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows,
        }
    }

    fn all_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }
}

/// Render `table` the way `output` asks; `None` prints plain lines.
pub fn control_output(
    table: &Table,
    mode: &str,
    output: Option<OutputKind>,
    results_dir: &Path,
) -> Result<()> {
    match output {
        Some(OutputKind::Pretty) => {
            pretty_table(table).printstd();
        }
        Some(OutputKind::File) => {
            let path = file_output(table, mode, results_dir)?;
            info!(path = %path.display(), "results saved");
        }
        None => {
            let mut stdout = io::stdout().lock();
            for row in table.all_rows() {
                writeln!(stdout, "{}", row.join(" "))?;
            }
        }
    }
    Ok(())
}

/// Bordered table with the header set apart, all cells left-aligned.
pub fn pretty_table(table: &Table) -> PrettyTable {
    let row = |cells: &[String]| Row::new(cells.iter().map(|c| Cell::new(c)).collect());

    let mut pretty = PrettyTable::new();
    pretty.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    pretty.set_titles(row(&table.header[..]));
    for r in &table.rows {
        pretty.add_row(row(&r[..]));
    }
    pretty
}

/// Write `table` to `<results_dir>/<mode>_<timestamp>.csv`.
pub fn file_output(table: &Table, mode: &str, results_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(results_dir)
        .with_context(|| format!("creating results directory {:?}", results_dir))?;
    let stamp = Local::now().format(DATETIME_FORMAT);
    let path = results_dir.join(format!("{}_{}.csv", mode, stamp));

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(&path)
        .with_context(|| format!("creating {:?}", &path))?;
    for row in table.all_rows() {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(path)
}
