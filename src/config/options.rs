// src/config/options.rs
use std::ops::Range;
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::csv::Quote;
use crate::error::ScrapeError;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

impl AppOptions {
    /// Reject option sets the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ScrapeError> {
        self.scrape.validate()?;
        self.export.validate()
    }
}

/// What to do with already-scraped pages when a fetch fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop, discard everything accumulated, write nothing.
    #[default]
    Abort,
    /// Stop fetching, write the pages before the failed one, then report.
    KeepPartial,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// URL with a `{page}` placeholder.
    pub url_template: String,
    /// Page numbers to fetch, closed-open.
    pub pages: Range<u32>,
    pub timeout: Duration,
    pub user_agent: String,
    pub workers: usize,
    /// Extra attempts per page after the first failure.
    pub retries: u32,
    pub retry_backoff: Duration,
    /// Pause after each request, per worker.
    pub request_pause: Duration,
    pub on_failure: FailurePolicy,
    /// First class token of a post container.
    pub post_class: String,
    /// First class token of the message body inside a post.
    pub body_class: String,
    /// Replacement for characters outside printable ASCII.
    pub placeholder: char,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            url_template: s!(DEFAULT_URL_TEMPLATE),
            pages: FIRST_PAGE..END_PAGE,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
            workers: WORKERS,
            retries: 0,
            retry_backoff: Duration::from_millis(RETRY_BACKOFF_MS),
            request_pause: Duration::from_millis(REQUEST_PAUSE_MS),
            on_failure: FailurePolicy::Abort,
            post_class: s!(POST_CLASS),
            body_class: s!(BODY_CLASS),
            placeholder: PLACEHOLDER,
        }
    }
}

impl ScrapeOptions {
    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.pages.is_empty() {
            return Err(ScrapeError::Config(format!(
                "page range {}..{} is empty",
                self.pages.start, self.pages.end
            )));
        }
        if !self.url_template.contains(PAGE_TOKEN) {
            return Err(ScrapeError::Config(format!(
                "URL template has no {PAGE_TOKEN} placeholder: {}",
                self.url_template
            )));
        }
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ScrapeError::Config(format!(
                "workers must be between 1 and {MAX_WORKERS}, got {}",
                self.workers
            )));
        }
        if !self.placeholder.is_ascii_graphic() {
            return Err(ScrapeError::Config(format!(
                "placeholder must be a printable, non-space ASCII character, got {:?}",
                self.placeholder
            )));
        }
        for (what, class) in [("post", &self.post_class), ("body", &self.body_class)] {
            if class.trim().is_empty() || class.contains(char::is_whitespace) {
                return Err(ScrapeError::Config(format!(
                    "{what} class must be a single class token, got {class:?}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_path: PathBuf,
    pub include_headers: bool,
    pub quote: Quote,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_path: PathBuf::from(DEFAULT_OUT_FILE),
            include_headers: false,
            quote: Quote::All,
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.out_path.as_os_str().is_empty() {
            return Err(ScrapeError::Config(s!("output path is empty")));
        }
        if self.out_path.is_dir() {
            return Err(ScrapeError::Config(format!(
                "output path is a directory: {}",
                self.out_path.display()
            )));
        }
        Ok(())
    }

    pub fn delim(&self) -> char {
        self.format.delim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_thread_layout() {
        let opts = AppOptions::default();
        assert_eq!(opts.scrape.pages, 2..100);
        assert_eq!(opts.scrape.timeout, Duration::from_secs(10));
        assert_eq!(opts.scrape.workers, 1);
        assert_eq!(opts.scrape.on_failure, FailurePolicy::Abort);
        assert_eq!(opts.export.out_path, PathBuf::from("edmunds_extraction.csv"));
        assert_eq!(opts.export.quote, Quote::All);
        assert!(!opts.export.include_headers);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_empty_or_inverted_range() {
        let mut opts = ScrapeOptions::default();
        opts.pages = 5..5;
        assert!(matches!(opts.validate(), Err(ScrapeError::Config(_))));
        opts.pages = Range { start: 9, end: 3 };
        assert!(matches!(opts.validate(), Err(ScrapeError::Config(_))));
    }

    #[test]
    fn rejects_template_without_page_token() {
        let mut opts = ScrapeOptions::default();
        opts.url_template = s!("https://example.com/thread/p1");
        assert!(matches!(opts.validate(), Err(ScrapeError::Config(_))));
    }

    #[test]
    fn rejects_bad_placeholder_and_markers() {
        let mut opts = ScrapeOptions::default();
        opts.placeholder = ' ';
        assert!(opts.validate().is_err());
        opts.placeholder = 'é';
        assert!(opts.validate().is_err());
        opts.placeholder = '*';
        assert!(opts.validate().is_ok());

        opts.post_class = s!("Comment Item");
        assert!(opts.validate().is_err());
        opts.post_class = s!("");
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_zero_workers() {
        let mut opts = ScrapeOptions::default();
        opts.workers = 0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn format_drives_extension_and_delimiter() {
        assert_eq!(ExportFormat::Csv.ext(), "csv");
        assert_eq!(ExportFormat::Tsv.delim(), '\t');
    }
}
