//! Text normalization applied before vectorization.
//!
//! Output alphabet is `[a-z ]`: lowercase, URLs stripped, everything that is not
//! an ASCII letter or whitespace dropped, whitespace collapsed and trimmed.
//! Digits, punctuation and non-Latin letters are lost; pretrained vectorizers
//! expect exactly this text, so the rules must not drift.

use once_cell::sync::Lazy;
use regex::Regex;

// Whitespace here is Unicode White_Space plus the separators U+001C..=U+001F,
// which the training-side tokenizer also splits on.
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http[^\s\x1c-\x1f]+").expect("url regex"));
static NON_ALPHA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z\s\x1c-\x1f]").expect("alpha regex"));
static SPACES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\x1c-\x1f]+").expect("whitespace regex"));

/// Word separator used by normalization and lexical word counting.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Canonical cleaned form of `text`. Total and idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = clean_once(&text.to_lowercase());
    // Dropping characters can splice a new `http...` run together
    // ("ht.tpfoo" -> "httpfoo"); strip again until stable.
    while URL_RE.is_match(&out) {
        out = clean_once(&out);
    }
    out
}

fn clean_once(lowered: &str) -> String {
    let no_urls = URL_RE.replace_all(lowered, "");
    let letters = NON_ALPHA_RE.replace_all(&no_urls, "");
    SPACES_RE.replace_all(&letters, " ").trim().to_string()
}
