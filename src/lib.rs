pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod html;
pub mod output;
pub mod pep;

pub use error::ScrapeError;
