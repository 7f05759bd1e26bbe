// src/crawl/mod.rs

pub mod download;
pub mod latest_versions;
pub mod whats_new;

use anyhow::Result;

use crate::cli::Mode;
use crate::config::Settings;
use crate::fetch::Fetcher;
use crate::output::Table;
use crate::pep;

pub use download::download;
pub use latest_versions::latest_versions;
pub use whats_new::whats_new;

/// Run the crawler for `mode`. `download` produces a file, not a table.
pub async fn run_mode<F: Fetcher>(mode: Mode, fetcher: &F, settings: &Settings) -> Result<Option<Table>> {
    match mode {
        Mode::WhatsNew => whats_new(fetcher, settings).await.map(Some),
        Mode::LatestVersions => latest_versions(fetcher, settings).await.map(Some),
        Mode::Download => download(fetcher, settings).await.map(|_| None),
        Mode::Pep => {
            let result = pep::run(fetcher, settings).await?;
            Ok(Some(pep::to_table(&result)))
        }
    }
}
