// src/error.rs

use thiserror::Error;

/// Structural failures a caller needs to tell apart from plain network errors.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// A top-level page could not be fetched after retries.
    #[error("failed to get a response from {url}")]
    Response { url: String },

    /// An element the page layout guarantees is missing.
    #[error("tag not found: <{tag}> {attrs}")]
    TagNotFound { tag: String, attrs: String },

    /// The sidebar no longer carries the "All versions" list.
    #[error("could not find the list of all Python versions")]
    VersionsNotFound,

    /// A locator was built from a tag/attribute pair the CSS parser rejects.
    #[error("invalid selector `{css}`: {reason}")]
    Selector { css: String, reason: String },
}
