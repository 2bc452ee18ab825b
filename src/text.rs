// src/text.rs
// Sentence and word tokenization on Unicode (UAX #29) boundaries, with two
// corrections plain boundaries get wrong in English prose: a period after a
// title abbreviation ("Mr.") ends neither the sentence nor the word, and
// hyphenated compounds ("pinkish-blue") stay one token.

use unicode_segmentation::UnicodeSegmentation;

/// Sample used when `tokenize` is run without input.
pub const EXAMPLE_TEXT: &str = "Hello Mr. Smith, how are you doing today? \
The weather is great and Python is awesome. The sky is pinkish-blue. \
You should not eat cardboard.";

/// Abbreviations whose trailing period does not end a sentence. Lowercase.
const ABBREVIATIONS: [&str; 16] = [
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs",
    "gen", "col", "lt", "sgt", "capt", "rev",
];

fn is_abbreviation(word: &str) -> bool {
    ABBREVIATIONS.contains(&word.to_ascii_lowercase().as_str())
}

/// `s` ends in `<abbreviation>.`
fn ends_with_abbreviation(s: &str) -> bool {
    let Some(head) = s.strip_suffix('.') else { return false };
    head.rsplit(|c: char| !c.is_alphanumeric())
        .next()
        .is_some_and(is_abbreviation)
}

fn is_wordlike(s: &str) -> bool {
    s.chars().next_back().is_some_and(char::is_alphanumeric)
}

/// Split into sentences, trimmed, empties dropped.
pub fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    for seg in text.unicode_sentences() {
        cur.push_str(seg);
        if ends_with_abbreviation(cur.trim_end()) {
            continue;
        }
        let s = cur.trim();
        if !s.is_empty() {
            out.push(s!(s));
        }
        cur.clear();
    }
    let rest = cur.trim();
    if !rest.is_empty() {
        out.push(s!(rest));
    }
    out
}

/// Split into word tokens. Punctuation is kept as its own token; whitespace is dropped.
pub fn words(text: &str) -> Vec<String> {
    // (segment, directly follows the previous segment with no whitespace)
    let mut segs: Vec<(&str, bool)> = Vec::new();
    let mut attached = false;
    for seg in text.split_word_bounds() {
        if seg.trim().is_empty() {
            attached = false;
            continue;
        }
        segs.push((seg, attached));
        attached = true;
    }

    let mut out: Vec<String> = Vec::new();
    let mut i = 0;
    while i < segs.len() {
        let (seg, attached) = segs[i];
        let prev_word = attached && out.last().is_some_and(|w| is_wordlike(w));

        // a-b, a-b-c
        if seg == "-" && prev_word {
            if let (Some(&(next, true)), Some(last)) = (segs.get(i + 1), out.last_mut()) {
                if is_wordlike(next) {
                    last.push('-');
                    last.push_str(next);
                    i += 2;
                    continue;
                }
            }
        }
        // Mr.
        if seg == "." && prev_word && out.last().is_some_and(|w| is_abbreviation(w)) {
            if let Some(last) = out.last_mut() {
                last.push('.');
                i += 1;
                continue;
            }
        }

        out.push(s!(seg));
        i += 1;
    }
    out
}
