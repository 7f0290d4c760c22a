//! # Score mapping
//! Probability → integer trust score → trust level + message.
//!
//! The score is `floor(p * 100)`; it is never rounded. A probability of
//! 0.799999 therefore lands at 79 (Medium), not 80 (High).

use serde::Serialize;
use std::fmt;

/// Scores at or above this are High Trust.
pub const HIGH_TRUST_THRESHOLD: u8 = 80;
/// Scores at or above this (and below High) are Medium Trust.
pub const MEDIUM_TRUST_THRESHOLD: u8 = 50;

pub const HIGH_TRUST_MESSAGE: &str = "The article is Highly Trustworthy";
pub const MEDIUM_TRUST_MESSAGE: &str = "The article is Moderately Trustworthy";
pub const LOW_TRUST_MESSAGE: &str = "The article is Not Trustworthy";

/// Integer trust score in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TrustScore(u8);

impl TrustScore {
    pub const MAX: TrustScore = TrustScore(100);

    /// Saturates at 100.
    pub fn new(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    /// Truncating conversion from a probability. Non-finite input maps to 0.
    pub fn from_probability(p: f64) -> Self {
        if !p.is_finite() {
            return Self(0);
        }
        Self((p * 100.0).floor().clamp(0.0, 100.0) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Count-up frames for a progressive display of this score.
    pub fn ticker(self) -> ScoreTicker {
        ScoreTicker::new(self)
    }
}

impl fmt::Display for TrustScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// Discrete trust level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrustLevel {
    #[serde(rename = "High Trust")]
    High,
    #[serde(rename = "Medium Trust")]
    Medium,
    #[serde(rename = "Low Trust")]
    Low,
}

impl TrustLevel {
    /// First matching threshold wins: High, then Medium, else Low.
    pub fn for_score(score: TrustScore) -> Self {
        if score.value() >= HIGH_TRUST_THRESHOLD {
            TrustLevel::High
        } else if score.value() >= MEDIUM_TRUST_THRESHOLD {
            TrustLevel::Medium
        } else {
            TrustLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrustLevel::High => "High Trust",
            TrustLevel::Medium => "Medium Trust",
            TrustLevel::Low => "Low Trust",
        }
    }

    /// Fixed human-readable message, one per level.
    pub fn message(self) -> &'static str {
        match self {
            TrustLevel::High => HIGH_TRUST_MESSAGE,
            TrustLevel::Medium => MEDIUM_TRUST_MESSAGE,
            TrustLevel::Low => LOW_TRUST_MESSAGE,
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of scoring one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub score: TrustScore,
    pub level: TrustLevel,
    pub message: &'static str,
}

impl Assessment {
    pub fn into_tuple(self) -> (u8, TrustLevel, &'static str) {
        (self.score.value(), self.level, self.message)
    }
}

/// Map a class-1 probability to score, level and message.
pub fn map_score(p: f64) -> Assessment {
    let score = TrustScore::from_probability(p);
    let level = TrustLevel::for_score(score);
    Assessment {
        score,
        level,
        message: level.message(),
    }
}

/// Lazy, finite count-up `0, 1, ..., score` for animated displays.
/// Cloning or [`ScoreTicker::restart`] replays the sequence from 0.
#[derive(Debug, Clone)]
pub struct ScoreTicker {
    target: u8,
    next: Option<u8>,
}

impl ScoreTicker {
    pub fn new(target: TrustScore) -> Self {
        Self {
            target: target.value(),
            next: Some(0),
        }
    }

    pub fn restart(&mut self) {
        self.next = Some(0);
    }
}

impl Iterator for ScoreTicker {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let cur = self.next?;
        self.next = if cur < self.target { Some(cur + 1) } else { None };
        Some(cur)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self
            .next
            .map(|n| (self.target - n) as usize + 1)
            .unwrap_or(0);
        (left, Some(left))
    }
}

impl ExactSizeIterator for ScoreTicker {}
