// src/core/html.rs
//! Typed queries over a parsed `scraper` tree.
//!
//! Forum markup tags posts and message bodies with a leading class token
//! (`<div class="Comment Item ...">`). CSS can only say "has class X", not
//! "first class is X", so `ClassQuery` pairs a tag selector with a check on
//! the first token of the `class` attribute.

use scraper::{ElementRef, Html, Node, Selector};

use crate::error::ScrapeError;

/// Elements whose boundaries separate words in visible text.
const BLOCK_TAGS: [&str; 14] = [
    "div", "p", "blockquote", "li", "ul", "ol", "pre", "table", "tr", "td",
    "h1", "h2", "h3", "h4",
];

pub fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e}")))
}

/// First whitespace-separated token of the element's `class` attribute.
pub fn first_class<'a>(el: &ElementRef<'a>) -> Option<&'a str> {
    el.value().attr("class")?.split_whitespace().next()
}

#[derive(Debug)]
pub struct ClassQuery {
    tag: Selector,
    class: String,
}

impl ClassQuery {
    pub fn new(tag: &str, class: &str) -> Result<Self, ScrapeError> {
        Ok(Self { tag: selector(tag)?, class: s!(class) })
    }

    fn has_class(&self, el: &ElementRef) -> bool {
        first_class(el) == Some(self.class.as_str())
    }

    /// Matching elements anywhere in the document, in document order.
    pub fn select_doc<'a>(&'a self, doc: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        doc.select(&self.tag).filter(move |el| self.has_class(el))
    }

    /// Matching descendants of `root`, in document order.
    pub fn select_in<'a>(&'a self, root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        root.select(&self.tag).filter(move |el| self.has_class(el))
    }

    /// Like `select_in`, minus any match nested inside another match.
    pub fn select_outermost_in<'a>(&'a self, root: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let hits: Vec<ElementRef<'a>> = self.select_in(root).collect();
        hits.iter()
            .filter(|el| !el.ancestors().any(|a| hits.iter().any(|h| h.id() == a.id())))
            .copied()
            .collect()
    }
}

/// Text fragments of `el` joined by single spaces (`<a>Jane <b>Doe</b></a>` → `"Jane  Doe"`).
pub fn joined_text(el: ElementRef) -> String {
    el.text().collect::<Vec<_>>().join(" ")
}

/// Outermost descendants of `root` with the given tag name. Does not descend into a match.
pub fn outermost<'a>(root: ElementRef<'a>, tag: &str) -> Vec<ElementRef<'a>> {
    let mut out = Vec::new();
    collect_outermost(root, tag, &mut out);
    out
}

fn collect_outermost<'a>(el: ElementRef<'a>, tag: &str, out: &mut Vec<ElementRef<'a>>) {
    for child in el.children().filter_map(ElementRef::wrap) {
        if child.value().name().eq_ignore_ascii_case(tag) {
            out.push(child);
        } else {
            collect_outermost(child, tag, out);
        }
    }
}

/// Visible text of `root` with `<br>` and block boundaries as line breaks,
/// leaving out every subtree whose tag is in `skip_tags`.
pub fn text_without(root: ElementRef, skip_tags: &[&str]) -> String {
    let mut out = String::new();
    push_text(root, skip_tags, &mut out);
    out
}

fn push_text(el: ElementRef, skip_tags: &[&str], out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(e) => {
                let name = e.name();
                if name.eq_ignore_ascii_case("br") {
                    out.push('\n');
                } else if skip_tags.iter().any(|t| name.eq_ignore_ascii_case(t)) {
                    // Keep words on either side of a removed block apart.
                    out.push(' ');
                } else if let Some(child_el) = ElementRef::wrap(child) {
                    let block = BLOCK_TAGS.iter().any(|t| name.eq_ignore_ascii_case(t));
                    if block { out.push('\n'); }
                    push_text(child_el, skip_tags, out);
                    if block { out.push('\n'); }
                }
            }
            _ => {}
        }
    }
}
