// src/cli.rs

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "pydocs_scraper",
    version,
    about = "Python documentation and PEP index scraper"
)]
pub struct Cli {
    /// Which crawler to run
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the HTTP response cache before running
    #[arg(short, long, default_value_t = false)]
    pub clear_cache: bool,

    /// Extra output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputKind>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    Pretty,
    File,
}
