// src/config.rs

use anyhow::{Context, Result};
use std::{env, path::PathBuf, time::Duration};
use url::Url;

pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const PEP_URL: &str = "https://peps.python.org/";

const RESULTS_DIR: &str = "results";
const DOWNLOADS_DIR: &str = "downloads";
const CACHE_DIR: &str = ".http_cache";

/// Index-page status groups. A detail-page status is counted only when it
/// belongs to one of these.
pub static EXPECTED_STATUS: &[(&str, &[&str])] = &[
    ("A", &["Active", "Accepted"]),
    ("D", &["Deferred"]),
    ("F", &["Final"]),
    ("P", &["Provisional"]),
    ("R", &["Rejected"]),
    ("S", &["Superseded"]),
    ("W", &["Withdrawn"]),
    ("", &["Draft", "Active"]),
];

/// True when `status` is a member of any group in [`EXPECTED_STATUS`].
pub fn is_recognized_status(status: &str) -> bool {
    EXPECTED_STATUS
        .iter()
        .any(|(_, members)| members.contains(&status))
}

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub timeout: Duration,
    /// `None` disables the on-disk response cache.
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub main_doc_url: Url,
    pub pep_url: Url,
    pub base_dir: PathBuf,
    pub http: HttpOptions,
}

impl Settings {
    /// Default HTTP policy with the response cache under `base_dir`.
    pub fn new(main_doc_url: Url, pep_url: Url, base_dir: PathBuf) -> Self {
        Self {
            main_doc_url,
            pep_url,
            http: HttpOptions {
                max_retries: 3,
                initial_backoff_ms: 500,
                timeout: Duration::from_secs(30),
                cache_dir: Some(base_dir.join(CACHE_DIR)),
            },
            base_dir,
        }
    }

    /// Defaults, overridable with `PYDOCS_BASE_DIR`, `PYDOCS_MAIN_DOC_URL`
    /// and `PYDOCS_PEP_URL`.
    pub fn from_env() -> Result<Self> {
        let base_dir = env::var("PYDOCS_BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let main_doc = env::var("PYDOCS_MAIN_DOC_URL").unwrap_or_else(|_| MAIN_DOC_URL.to_string());
        let pep = env::var("PYDOCS_PEP_URL").unwrap_or_else(|_| PEP_URL.to_string());

        let main_doc_url =
            Url::parse(&main_doc).with_context(|| format!("parsing main doc URL {}", main_doc))?;
        let pep_url = Url::parse(&pep).with_context(|| format!("parsing PEP URL {}", pep))?;
        Ok(Self::new(main_doc_url, pep_url, base_dir))
    }

    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join(RESULTS_DIR)
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join(DOWNLOADS_DIR)
    }
}
