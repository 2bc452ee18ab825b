// src/specs/mod.rs
//! # Scraping “specs”
//!
//! Page-specific extraction: *where the data lives in the HTML* and *how to
//! pull it out*. Specs are pure: they take a page body and return posts.
//! Fetching, ordering, normalization policy and export live elsewhere.
//!
//! ## Typical call chain
//! ```text
//! cli → runner::run → scrape::collect_posts → specs::forum::parse_doc
//!                                           ↘ store::DataSet → file::write_export
//! ```
//!
//! ## Conventions
//! - Query through `core::html::ClassQuery` / `scraper::Selector`, never raw string scans.
//! - A post that cannot be identified is skipped with a `warn!`, never a panic.
//! - Specs are testable offline against inline HTML fixtures.
pub mod forum;
