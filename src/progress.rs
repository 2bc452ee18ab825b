// src/progress.rs
/// Lightweight progress reporting for the scrape loop.
/// Front-ends implement this to surface status to users; it is only ever
/// called from the thread that runs `collect_posts`.
pub trait Progress {
    /// Called at the start with the number of pages in the range.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page fetched and extracted.
    fn item_done(&mut self, _page: u32, _posts: usize) {}

    /// One page failed to fetch.
    fn item_failed(&mut self, _page: u32, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Prints one status line per page to stderr.
#[derive(Default)]
pub struct StderrProgress {
    done: usize,
    total: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, page: u32, posts: usize) {
        self.done += 1;
        eprintln!("Page {page}: {posts} posts ({}/{})", self.done, self.total);
    }
    fn item_failed(&mut self, page: u32, msg: &str) {
        eprintln!("Page {page}: failed: {msg}");
    }
    fn finish(&mut self) {
        if self.total == 0 {
            eprintln!("Fetch complete");
        } else {
            eprintln!("Fetch complete ({}/{})", self.done, self.total);
        }
    }
}
