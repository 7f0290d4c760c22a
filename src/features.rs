//! Hand-crafted lexical signals computed over the *original* article text.
//!
//! The four values are appended after the term-frequency columns, so their
//! order is part of the model contract: word count, `!` count, `?` count,
//! clickbait phrase hits.

use serde::Serialize;

use crate::normalize::is_separator;

/// Number of lexical columns appended to every feature row.
pub const LEXICAL_WIDTH: usize = 4;

/// Clickbait phrases, matched as raw substrings of the lowercased text.
/// Order and spelling must match the list the classifier was trained with.
pub const CLICKBAIT_PHRASES: [&str; 17] = [
    "breaking",
    "shocking",
    "unbelievable",
    "you wont believe",
    "must read",
    "exclusive",
    "top",
    "amazing",
    "incredible",
    "surprising",
    "jaw dropping",
    "mind blowing",
    "omg",
    "stunning",
    "secret",
    "secrets",
    "mind-blowing",
];

/// Lexical feature vector in model column order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LexicalVector {
    pub word_count: usize,
    pub exclamation_count: usize,
    pub question_count: usize,
    pub clickbait_hits: usize,
}

impl LexicalVector {
    /// Values as model features, in column order.
    pub fn to_features(&self) -> [f64; LEXICAL_WIDTH] {
        [
            self.word_count as f64,
            self.exclamation_count as f64,
            self.question_count as f64,
            self.clickbait_hits as f64,
        ]
    }
}

/// Extract the lexical signals using the built-in clickbait list.
pub fn extract(text: &str) -> LexicalVector {
    extract_with(text, &CLICKBAIT_PHRASES)
}

/// Same as [`extract`] with a caller-provided phrase list.
/// Each phrase counts at most once, however often it occurs.
pub fn extract_with<S: AsRef<str>>(text: &str, phrases: &[S]) -> LexicalVector {
    let lowered = text.to_lowercase();
    LexicalVector {
        word_count: lowered
            .split(is_separator)
            .filter(|w| !w.is_empty())
            .count(),
        exclamation_count: text.matches('!').count(),
        question_count: text.matches('?').count(),
        clickbait_hits: phrases
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|p| lowered.contains(*p))
            .count(),
    }
}
