// src/scrape/scrape.rs
use std::{
    thread,
    sync::{ mpsc, atomic::{ AtomicBool, AtomicUsize, Ordering }},
};

use tracing::{error, info};

use crate::{
    config::ScrapeOptions,
    core::{ net::{ self, PageSource }, sanitize::Normalizer },
    error::{ FetchError, ScrapeError },
    progress::Progress,
    specs::forum::{ self, PostSpec },
    store::{ DataSet, Record },
};

/// What the scrape loop produced.
#[derive(Debug)]
pub struct Collected {
    /// Records from every page before the first failure, in page-then-post order,
    /// padded to a fixed width.
    pub data: DataSet,
    pub pages_done: usize,
    pub skipped_posts: usize,
    /// Set when a page could not be fetched. Pages at or after it are not in `data`.
    pub failure: Option<FetchError>,
}

enum PageResult {
    Done { page: u32, records: Vec<Record>, skipped: usize },
    Failed(FetchError),
}

/// Fetch, extract and normalize every page in `opts.pages`.
///
/// Pages are claimed in ascending order from a shared counter by `opts.workers`
/// threads. After the first fetch failure no new page is claimed; pages already
/// in flight finish. Results are re-sorted by page number before merging, so the
/// output order does not depend on the worker count.
pub fn collect_posts(
    opts: &ScrapeOptions,
    source: &dyn PageSource,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Collected, ScrapeError> {
    opts.validate()?;
    let spec = PostSpec::from_options(opts)?;
    let norm = Normalizer::new(opts.placeholder);

    let pages: Vec<u32> = opts.pages.clone().collect();
    let next = AtomicUsize::new(0);
    let abort = AtomicBool::new(false);
    let workers = opts.workers.min(pages.len()).max(1);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(pages.len());
        p.log(&format!("Scraping pages {}..{}", opts.pages.start, opts.pages.end));
    }
    info!(
        first = opts.pages.start, end = opts.pages.end, workers,
        template = %opts.url_template, "scraping"
    );

    let (res_tx, res_rx) = mpsc::channel::<PageResult>();
    let mut done: Vec<(u32, Vec<Record>)> = Vec::new();
    let mut failures: Vec<FetchError> = Vec::new();
    let mut skipped_posts = 0usize;

    thread::scope(|s| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let (pages, next, abort, spec, norm) = (&pages, &next, &abort, &spec, &norm);

            s.spawn(move || {
                loop {
                    if abort.load(Ordering::Acquire) {
                        break;
                    }
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    let Some(&page) = pages.get(i) else { break };

                    let result = scrape_page(opts, source, spec, norm, page);
                    if matches!(result, PageResult::Failed(_)) {
                        abort.store(true, Ordering::Release);
                    }
                    if tx.send(result).is_err() {
                        break;
                    }
                    if !opts.request_pause.is_zero() {
                        thread::sleep(opts.request_pause); // be polite
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for result in res_rx {
            match result {
                PageResult::Done { page, records, skipped } => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(page, records.len());
                    }
                    skipped_posts += skipped;
                    done.push((page, records));
                }
                PageResult::Failed(err) => {
                    error!(page = err.page, url = %err.url, error = %err.source, "fetch failed");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(err.page, &err.source.to_string());
                    }
                    failures.push(err);
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let failure = failures.into_iter().min_by_key(|e| e.page);
    Ok(merge(done, failure, skipped_posts))
}

fn scrape_page(
    opts: &ScrapeOptions,
    source: &dyn PageSource,
    spec: &PostSpec,
    norm: &Normalizer,
    page: u32,
) -> PageResult {
    let url = net::build_url(&opts.url_template, page);
    let body = match net::fetch_page(source, page, &url, opts.retries, opts.retry_backoff) {
        Ok(body) => body,
        Err(e) => return PageResult::Failed(e),
    };
    let extract = forum::parse_doc(&body, spec, page);
    let records = extract
        .posts
        .into_iter()
        .map(|post| post.normalized(norm).into_record())
        .collect();
    PageResult::Done { page, records, skipped: extract.skipped }
}

/// Sort pages, cut everything at or after the failed page, flatten.
fn merge(
    mut done: Vec<(u32, Vec<Record>)>,
    failure: Option<FetchError>,
    skipped_posts: usize,
) -> Collected {
    done.sort_by_key(|(page, _)| *page);
    if let Some(f) = &failure {
        done.retain(|(page, _)| *page < f.page);
    }

    let pages_done = done.len();
    let mut data = DataSet::new();
    for (_, records) in done {
        data.extend(records);
    }
    data.pad_to_width();

    Collected { data, pages_done, skipped_posts, failure }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use crate::error::BoxError;

    /// Serves canned pages from memory; `mem://{page}` URLs.
    struct MemSite {
        pages: HashMap<u32, String>,
        fail_on: Option<u32>,
        calls: Mutex<Vec<u32>>,
    }

    impl MemSite {
        fn new(pages: impl IntoIterator<Item = (u32, String)>) -> Self {
            Self { pages: pages.into_iter().collect(), fail_on: None, calls: Mutex::new(Vec::new()) }
        }
    }

    impl PageSource for MemSite {
        fn fetch(&self, url: &str) -> Result<String, BoxError> {
            let page: u32 = url.trim_start_matches("mem://").parse()?;
            self.calls.lock().unwrap().push(page);
            if self.fail_on == Some(page) {
                return Err("timed out".into());
            }
            Ok(self.pages.get(&page).cloned().unwrap_or_default())
        }
    }

    fn page_with(authors: &[&str]) -> String {
        let mut html = s!("<html><body>");
        for a in authors {
            html.push_str(&format!(
                r#"<div class="Comment"><a>{a}</a><time>t</time><div class="Message">msg {a}</div></div>"#
            ));
        }
        html.push_str("</body></html>");
        html
    }

    fn opts(pages: std::ops::Range<u32>, workers: usize) -> ScrapeOptions {
        ScrapeOptions {
            url_template: s!("mem://{page}"),
            pages,
            workers,
            retry_backoff: Duration::ZERO,
            ..ScrapeOptions::default()
        }
    }

    fn authors(data: &DataSet) -> Vec<String> {
        data.rows.iter().map(|r| r[0].clone()).collect()
    }

    #[test]
    fn pages_fetched_once_each_in_ascending_order() {
        let site = MemSite::new((2..6).map(|p| (p, page_with(&[format!("p{p}").as_str()]))));
        let out = collect_posts(&opts(2..6, 1), &site, None).unwrap();
        assert_eq!(*site.calls.lock().unwrap(), vec![2, 3, 4, 5]);
        assert!(out.failure.is_none());
        assert_eq!(out.pages_done, 4);
        assert_eq!(authors(&out.data), vec!["p2", "p3", "p4", "p5"]);
    }

    #[test]
    fn failure_stops_fetching_and_cuts_output() {
        let mut site = MemSite::new((2..100).map(|p| (p, page_with(&["x"]))));
        site.fail_on = Some(5);
        let out = collect_posts(&opts(2..100, 1), &site, None).unwrap();

        assert_eq!(*site.calls.lock().unwrap(), vec![2, 3, 4, 5]);
        let failure = out.failure.expect("page 5 should fail");
        assert_eq!(failure.page, 5);
        assert_eq!(out.pages_done, 3);
        assert_eq!(out.data.len(), 3);
    }

    #[test]
    fn parallel_workers_keep_page_then_post_order() {
        let site = MemSite::new(
            (1..21).map(|p| (p, page_with(&[format!("{p}a").as_str(), format!("{p}b").as_str()]))),
        );
        let out = collect_posts(&opts(1..21, 4), &site, None).unwrap();
        let expected: Vec<String> = (1..21)
            .flat_map(|p| [format!("{p}a"), format!("{p}b")])
            .collect();
        assert_eq!(authors(&out.data), expected);

        let mut calls = site.calls.lock().unwrap().clone();
        calls.sort_unstable();
        assert_eq!(calls, (1..21).collect::<Vec<_>>());
    }

    #[test]
    fn parallel_failure_keeps_only_pages_before_it() {
        let mut site = MemSite::new((1..41).map(|p| (p, page_with(&[format!("p{p}").as_str()]))));
        site.fail_on = Some(10);
        let out = collect_posts(&opts(1..41, 4), &site, None).unwrap();
        assert_eq!(out.failure.as_ref().map(|f| f.page), Some(10));
        let expected: Vec<String> = (1..10).map(|p| format!("p{p}")).collect();
        assert_eq!(authors(&out.data), expected);
    }

    #[test]
    fn rows_are_padded_across_pages() {
        let quoted = r#"<div class="Comment"><a>q</a><time>t</time>
            <div class="Message">b<blockquote>one</blockquote><blockquote>two</blockquote></div></div>"#;
        let bare = r#"<div class="Comment"><a>n</a><time>t</time></div>"#;
        let site = MemSite::new([(1, s!(bare)), (2, s!(quoted))]);
        let out = collect_posts(&opts(1..3, 1), &site, None).unwrap();
        assert_eq!(out.data.rows, vec![
            vec![s!("n"), s!("t"), s!(""), s!(""), s!("")],
            vec![s!("q"), s!("t"), s!("b"), s!("one"), s!("two")],
        ]);
    }

    #[test]
    fn progress_sees_every_page() {
        #[derive(Default)]
        struct Count { begun: usize, done: Vec<u32>, failed: Vec<u32>, finished: bool }
        impl Progress for Count {
            fn begin(&mut self, total: usize) { self.begun = total; }
            fn item_done(&mut self, page: u32, _posts: usize) { self.done.push(page); }
            fn item_failed(&mut self, page: u32, _msg: &str) { self.failed.push(page); }
            fn finish(&mut self) { self.finished = true; }
        }

        let mut site = MemSite::new((1..5).map(|p| (p, page_with(&["a"]))));
        site.fail_on = Some(3);
        let mut count = Count::default();
        collect_posts(&opts(1..5, 1), &site, Some(&mut count)).unwrap();
        assert_eq!(count.begun, 4);
        assert_eq!(count.done, vec![1, 2]);
        assert_eq!(count.failed, vec![3]);
        assert!(count.finished);
    }

    #[test]
    fn invalid_options_are_rejected_before_fetching() {
        let site = MemSite::new(Vec::<(u32, String)>::new());
        let mut o = opts(1..3, 1);
        o.url_template = s!("mem://fixed");
        assert!(matches!(collect_posts(&o, &site, None), Err(ScrapeError::Config(_))));
        assert!(site.calls.lock().unwrap().is_empty());
    }
}
