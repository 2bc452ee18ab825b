// src/specs/forum.rs
//! Post extraction for Vanilla-style discussion threads.
//!
//! Shape of a post (irrelevant attributes elided):
//! ```text
//! <div class="Comment">
//!   <a class="PhotoWrap"><img …></a>            ← avatar link
//!   <a class="Username">Jane Doe</a>             ← author
//!   <time datetime=…>2021-01-05</time>
//!   <div class="Message">
//!     Hello world
//!     <blockquote class="Quote">original text</blockquote>
//!   </div>
//! </div>
//! ```
//!
//! Columns: Author, Timestamp, Body, Quote 1..n

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::config::ScrapeOptions;
use crate::core::html::{self, ClassQuery};
use crate::core::sanitize::Normalizer;
use crate::error::ScrapeError;
use crate::store::Record;

/// One forum entry. Fields hold raw text until passed through `normalized`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Post {
    pub author: String,
    pub timestamp: String,
    pub body: String,
    pub quotes: Vec<String>,
}

impl Post {
    pub fn normalized(self, norm: &Normalizer) -> Post {
        Post {
            author: norm.normalize(&self.author),
            timestamp: norm.normalize(&self.timestamp),
            body: norm.normalize(&self.body),
            quotes: self.quotes.iter().map(|q| norm.normalize(q)).collect(),
        }
    }

    pub fn into_record(self) -> Record {
        let mut row = Vec::with_capacity(3 + self.quotes.len());
        row.push(self.author);
        row.push(self.timestamp);
        row.push(self.body);
        row.extend(self.quotes);
        row
    }
}

/// Why a post container could not be turned into a `Post`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Missing {
    AuthorLink,
    TimeElement,
}

/// Compiled queries for one thread layout.
#[derive(Debug)]
pub struct PostSpec {
    post: ClassQuery,
    body: ClassQuery,
    link: Selector,
    time: Selector,
}

impl PostSpec {
    pub fn new(post_class: &str, body_class: &str) -> Result<Self, ScrapeError> {
        Ok(Self {
            post: ClassQuery::new("div", post_class)?,
            body: ClassQuery::new("div", body_class)?,
            link: html::selector("a")?,
            time: html::selector("time")?,
        })
    }

    pub fn from_options(opts: &ScrapeOptions) -> Result<Self, ScrapeError> {
        Self::new(&opts.post_class, &opts.body_class)
    }
}

/// Posts found on one page, in document order.
#[derive(Debug, Default)]
pub struct PageExtract {
    pub posts: Vec<Post>,
    pub skipped: usize,
}

/// Extract every post on a page. Unidentifiable posts are logged and skipped.
pub fn parse_doc(html_doc: &str, spec: &PostSpec, page: u32) -> PageExtract {
    let doc = Html::parse_document(html_doc);
    let mut out = PageExtract::default();

    for (ix, node) in spec.post.select_doc(&doc).enumerate() {
        match extract_post(node, spec) {
            Ok(post) => out.posts.push(post),
            Err(missing) => {
                warn!(page, post = ix, ?missing, "skipping post");
                out.skipped += 1;
            }
        }
    }
    debug!(page, posts = out.posts.len(), skipped = out.skipped, "extracted");
    out
}

pub fn extract_post(node: ElementRef, spec: &PostSpec) -> Result<Post, Missing> {
    // First link is the avatar when two are present.
    let links: Vec<ElementRef> = node.select(&spec.link).take(2).collect();
    let author_link = links.last().ok_or(Missing::AuthorLink)?;
    let author = html::joined_text(*author_link);

    let time = node.select(&spec.time).next().ok_or(Missing::TimeElement)?;
    let timestamp = html::joined_text(time);

    // Several bodies (edited or merged posts) are joined; quotes from all of them are kept.
    let messages = spec.body.select_outermost_in(node);
    if messages.len() > 1 {
        debug!(bodies = messages.len(), "joining message bodies");
    }
    let mut bodies = Vec::with_capacity(messages.len());
    let mut quotes = Vec::new();
    for message in messages {
        let (text, q) = extract_message(message);
        bodies.push(text);
        quotes.extend(q);
    }

    Ok(Post { author, timestamp, body: bodies.join("\n"), quotes })
}

/// Split a message into body text and its top-level quotes.
/// Quote text never appears in the body.
fn extract_message(message: ElementRef) -> (String, Vec<String>) {
    let quotes = html::outermost(message, "blockquote")
        .into_iter()
        .map(|bq| html::text_without(bq, &[]))
        .collect();
    let body = html::text_without(message, &["blockquote"]);
    (body, quotes)
}
