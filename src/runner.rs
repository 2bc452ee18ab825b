// src/runner.rs
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::{
    config::{AppOptions, FailurePolicy},
    core::net::PageSource,
    error::ScrapeError,
    file,
    progress::Progress,
    scrape::{self, Collected},
    store::DataSet,
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub posts: usize,
    pub skipped_posts: usize,
}

/// Top-level pipeline: scrape the configured range, then write the export once.
///
/// On a fetch failure the outcome depends on `scrape.on_failure`:
/// `Abort` discards everything and writes nothing; `KeepPartial` writes the
/// pages before the failure and returns `ScrapeError::Interrupted`.
pub fn run(
    opts: &AppOptions,
    source: &dyn PageSource,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, ScrapeError> {
    opts.validate()?;

    let Collected { mut data, pages_done, skipped_posts, failure } =
        scrape::collect_posts(&opts.scrape, source, progress)?;

    if skipped_posts > 0 {
        warn!(skipped_posts, "some posts could not be identified and were skipped");
    }

    match (failure, opts.scrape.on_failure) {
        (None, _) => {
            let path = export(opts, &mut data)?;
            info!(pages = pages_done, posts = data.len(), "done");
            Ok(RunSummary { path, pages: pages_done, posts: data.len(), skipped_posts })
        }
        (Some(err), FailurePolicy::Abort) => {
            error!(discarded = data.len(), "aborting run; nothing written");
            Err(err.into())
        }
        (Some(err), FailurePolicy::KeepPartial) => {
            let path = export(opts, &mut data)?;
            warn!(pages = pages_done, posts = data.len(), "partial results written");
            Err(ScrapeError::Interrupted { path, source: err })
        }
    }
}

fn export(opts: &AppOptions, data: &mut DataSet) -> Result<PathBuf, ScrapeError> {
    if opts.export.include_headers {
        data.headers = Some(data.header_row());
    }
    file::write_export(&opts.export, data)
}
