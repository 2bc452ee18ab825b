// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Boxed transport error as surfaced by a `PageSource`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The one failure kind the scrape loop recognizes: a page could not be fetched.
#[derive(Debug, Error)]
#[error("failed to fetch page {page} ({url})")]
pub struct FetchError {
    pub page: u32,
    pub url: String,
    #[source]
    pub source: BoxError,
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Fetch failed mid-run, but the pages before it were flushed.
    #[error("run interrupted; partial results written to {}", .path.display())]
    Interrupted {
        path: PathBuf,
        #[source]
        source: FetchError,
    },

    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid selector: {0}")]
    Selector(String),
}

impl ScrapeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
