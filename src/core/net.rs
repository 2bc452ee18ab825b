// src/core/net.rs
// Page transport: URL building, the `PageSource` seam, and the blocking HTTP client behind it.

use std::{thread, time::{Duration, Instant}};

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config::{consts::PAGE_TOKEN, ScrapeOptions};
use crate::error::{BoxError, FetchError, ScrapeError};

/// Substitute the page number into the URL template.
pub fn build_url(template: &str, page: u32) -> String {
    template.replace(PAGE_TOKEN, &page.to_string())
}

/// Anything that can turn a URL into a page body.
/// Shared by reference across scrape workers.
pub trait PageSource: Sync {
    fn fetch(&self, url: &str) -> Result<String, BoxError>;
}

/// GET over HTTP(S) with a fixed per-request timeout.
/// The status code is logged but never rejected: any body that arrives is returned.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(opts: &ScrapeOptions) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(opts.timeout)
            .user_agent(opts.user_agent.as_str())
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, BoxError> {
        let t = Instant::now();
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%url, %status, "non-success status; keeping body anyway");
        }
        let body = resp.text()?;
        debug!(%url, %status, bytes = body.len(), elapsed = ?t.elapsed(), "fetched");
        Ok(body)
    }
}

/// Fetch one page, retrying up to `retries` times with linear backoff.
pub fn fetch_page(
    source: &dyn PageSource,
    page: u32,
    url: &str,
    retries: u32,
    backoff: Duration,
) -> Result<String, FetchError> {
    let mut attempt = 0u32;
    loop {
        match source.fetch(url) {
            Ok(body) => return Ok(body),
            Err(e) if attempt < retries => {
                attempt += 1;
                warn!(page, %url, attempt, error = %e, "fetch failed; retrying");
                thread::sleep(backoff * attempt);
            }
            Err(e) => return Err(FetchError { page, url: s!(url), source: e }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Flaky {
        failures_left: Mutex<u32>,
        calls: Mutex<u32>,
    }

    impl PageSource for Flaky {
        fn fetch(&self, _url: &str) -> Result<String, BoxError> {
            *self.calls.lock().unwrap() += 1;
            let mut left = self.failures_left.lock().unwrap();
            if *left > 0 {
                *left -= 1;
                return Err("connection reset".into());
            }
            Ok(s!("<html></html>"))
        }
    }

    fn flaky(failures: u32) -> Flaky {
        Flaky { failures_left: Mutex::new(failures), calls: Mutex::new(0) }
    }

    #[test]
    fn build_url_substitutes_page() {
        assert_eq!(
            build_url("https://example.com/discussion/p{page}", 7),
            "https://example.com/discussion/p7"
        );
    }

    #[test]
    fn no_retries_fails_on_first_error() {
        let src = flaky(1);
        let err = fetch_page(&src, 3, "mem://3", 0, Duration::ZERO).unwrap_err();
        assert_eq!(err.page, 3);
        assert_eq!(err.url, "mem://3");
        assert_eq!(err.source.to_string(), "connection reset");
        assert_eq!(*src.calls.lock().unwrap(), 1);
    }

    #[test]
    fn retries_recover_from_transient_errors() {
        let src = flaky(2);
        let body = fetch_page(&src, 1, "mem://1", 2, Duration::ZERO).unwrap();
        assert_eq!(body, "<html></html>");
        assert_eq!(*src.calls.lock().unwrap(), 3);
    }

    #[test]
    fn http_fetcher_builds_from_defaults() {
        assert!(HttpFetcher::new(&ScrapeOptions::default()).is_ok());
    }
}
