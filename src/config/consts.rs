// src/config/consts.rs

// Net config
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://forums.edmunds.com/discussion/7526/general/x/midsize-sedans-2-0/p{page}";
pub const PAGE_TOKEN: &str = "{page}";
pub const USER_AGENT: &str = concat!("forum_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// Run range, closed-open
pub const FIRST_PAGE: u32 = 2;
pub const END_PAGE: u32 = 100;

// Scrape
pub const POST_CLASS: &str = "Comment";
pub const BODY_CLASS: &str = "Message";
pub const PLACEHOLDER: char = '?';

// Export
pub const DEFAULT_OUT_FILE: &str = "edmunds_extraction.csv";

// Concurrency
pub const WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 16;
pub const REQUEST_PAUSE_MS: u64 = 0;
pub const RETRY_BACKOFF_MS: u64 = 500;
