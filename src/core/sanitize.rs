// src/core/sanitize.rs

/// Line-break markup that can leak into extracted text as literal strings.
const BR_REMNANTS: [&str; 3] = ["<br>", "<br/>", "<br />"];

/// Collapse every whitespace run (line breaks included) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Replace anything outside printable 7-bit ASCII with `placeholder`.
/// Plain spaces survive; every other control or non-ASCII char is replaced.
pub fn to_printable_ascii(s: &str, placeholder: char) -> String {
    s.chars()
        .map(|ch| if ch == ' ' || ch.is_ascii_graphic() { ch } else { placeholder })
        .collect()
}

/// Replace literal `<br>`, `<br/>` and `<br />` (any case) with a space.
pub fn strip_br_remnants(s: &str) -> String {
    let mut out = s.to_string();
    for pat in BR_REMNANTS {
        loop {
            // ASCII lowercasing keeps byte offsets intact.
            let Some(i) = out.to_ascii_lowercase().find(pat) else { break };
            out.replace_range(i..i + pat.len(), " ");
        }
    }
    out
}

/// Maps every extracted fragment to the canonical output encoding:
/// trimmed, single-spaced, printable ASCII.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Normalizer {
    placeholder: char,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self { placeholder: crate::config::consts::PLACEHOLDER }
    }
}

impl Normalizer {
    pub fn new(placeholder: char) -> Self {
        Self { placeholder }
    }

    /// Runs to a fixpoint, so normalizing twice never changes the result.
    pub fn normalize(&self, s: &str) -> String {
        let mut cur = normalize_ws(s);
        loop {
            let ascii = to_printable_ascii(&cur, self.placeholder);
            let next = normalize_ws(&strip_br_remnants(&ascii));
            if next == cur {
                return next;
            }
            cur = next;
        }
    }
}
