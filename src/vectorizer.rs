//! Term-frequency vectorizer collaborator.
//!
//! The pipeline only needs the [`Vectorizer`] trait. [`TfidfVectorizer`] reads a
//! JSON export of a fitted TF-IDF vectorizer and reproduces its transform:
//! `(?u)\b\w\w+\b` tokens, optional stop words, word n-grams, counts (or
//! presence), optional sublinear tf, idf weighting, row normalization.
//!
//! JSON shape:
//! {
//!   "vocabulary": { "economy": 0, "officials": 1 },
//!   "idf": [1.7, 2.1],
//!   "ngram_range": [1, 1],
//!   "norm": "l2",
//!   "sublinear_tf": false,
//!   "binary": false,
//!   "stop_words": []
//! }

use std::collections::{HashMap, HashSet};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::artifacts::read_json;
use crate::error::ArtifactError;
use crate::sparse::SparseVector;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("token regex"));

/// Maps a document to a sparse row over a fixed vocabulary.
pub trait Vectorizer: Send + Sync {
    /// Vocabulary width V; every produced row has exactly this width.
    fn vocabulary_width(&self) -> usize;

    /// Transform a single document.
    fn transform_one(&self, document: &str) -> SparseVector;

    /// Transform a batch; one row per document, in order.
    fn transform(&self, documents: &[&str]) -> Vec<SparseVector> {
        documents.iter().map(|d| self.transform_one(d)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_lowercase() -> bool {
    true
}

/// On-disk form of the vectorizer.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfArtifact {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub binary: bool,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default)]
    pub stop_words: Vec<String>,
}

/// Fitted TF-IDF vectorizer, immutable after construction.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    ngram_range: (usize, usize),
    norm: Option<Norm>,
    sublinear_tf: bool,
    binary: bool,
    lowercase: bool,
    stop_words: HashSet<String>,
}

impl TfidfVectorizer {
    /// Validate an artifact and build the vectorizer.
    pub fn from_artifact(a: TfidfArtifact) -> Result<Self, ArtifactError> {
        const KIND: &str = "vectorizer";
        let width = a.vocabulary.len();
        if width == 0 {
            return Err(ArtifactError::invalid(KIND, "empty vocabulary"));
        }
        if let Some((term, col)) = a.vocabulary.iter().find(|(_, c)| **c >= width) {
            return Err(ArtifactError::invalid(
                KIND,
                format!("term {term:?} maps to column {col}, vocabulary has {width} columns"),
            ));
        }
        let distinct: HashSet<usize> = a.vocabulary.values().copied().collect();
        if distinct.len() != width {
            return Err(ArtifactError::invalid(KIND, "duplicate vocabulary columns"));
        }
        if let Some(idf) = &a.idf {
            if idf.len() != width {
                return Err(ArtifactError::invalid(
                    KIND,
                    format!("idf has {} entries, vocabulary has {width}", idf.len()),
                ));
            }
            if idf.iter().any(|x| !x.is_finite()) {
                return Err(ArtifactError::invalid(KIND, "idf contains non-finite values"));
            }
        }
        let (min_n, max_n) = a.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ArtifactError::invalid(
                KIND,
                format!("bad ngram_range ({min_n}, {max_n})"),
            ));
        }

        Ok(Self {
            vocabulary: a.vocabulary,
            idf: a.idf,
            ngram_range: a.ngram_range,
            norm: a.norm,
            sublinear_tf: a.sublinear_tf,
            binary: a.binary,
            lowercase: a.lowercase,
            stop_words: a.stop_words.into_iter().collect(),
        })
    }

    /// Load and validate a JSON artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let artifact: TfidfArtifact = read_json(path)?;
        Self::from_artifact(artifact)
    }

    fn analyze_terms(&self, document: &str) -> Vec<String> {
        let lowered;
        let doc = if self.lowercase {
            lowered = document.to_lowercase();
            lowered.as_str()
        } else {
            document
        };

        let tokens: Vec<&str> = TOKEN_RE
            .find_iter(doc)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl Vectorizer for TfidfVectorizer {
    fn vocabulary_width(&self) -> usize {
        self.vocabulary.len()
    }

    fn transform_one(&self, document: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze_terms(document) {
            if let Some(&col) = self.vocabulary.get(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| {
                let mut v = if self.binary { 1.0 } else { tf };
                if self.sublinear_tf {
                    v = 1.0 + v.ln();
                }
                if let Some(idf) = &self.idf {
                    v *= idf[col];
                }
                (col, v)
            })
            .collect();

        let scale = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if scale > 0.0 && scale != 1.0 {
            for (_, v) in entries.iter_mut() {
                *v /= scale;
            }
        }

        SparseVector::from_entries(self.vocabulary_width(), entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(terms: &[&str]) -> TfidfArtifact {
        TfidfArtifact {
            vocabulary: terms
                .iter()
                .enumerate()
                .map(|(i, t)| (t.to_string(), i))
                .collect(),
            idf: None,
            ngram_range: (1, 1),
            norm: None,
            sublinear_tf: false,
            binary: false,
            lowercase: true,
            stop_words: Vec::new(),
        }
    }

    #[test]
    fn raw_counts_without_idf_or_norm() {
        let v = TfidfVectorizer::from_artifact(artifact(&["fed", "rates", "cut"])).unwrap();
        let row = v.transform_one("fed rates rates unknown");
        assert_eq!(row.width(), 3);
        assert_eq!(row.to_dense(), vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn single_char_tokens_are_ignored() {
        let v = TfidfVectorizer::from_artifact(artifact(&["a", "ok"])).unwrap();
        let row = v.transform_one("a ok a");
        assert_eq!(row.to_dense(), vec![0.0, 1.0]);
    }

    #[test]
    fn l2_norm_and_idf() {
        let mut a = artifact(&["alpha", "beta"]);
        a.idf = Some(vec![1.0, 2.0]);
        a.norm = Some(Norm::L2);
        let v = TfidfVectorizer::from_artifact(a).unwrap();
        let row = v.transform_one("alpha beta");
        // raw [1, 2] -> / sqrt(5)
        let d = row.to_dense();
        assert!((d[0] - 1.0 / 5f64.sqrt()).abs() < 1e-12);
        assert!((d[1] - 2.0 / 5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn sublinear_binary_and_l1() {
        let mut a = artifact(&["x1", "y1"]);
        a.sublinear_tf = true;
        a.norm = Some(Norm::L1);
        let v = TfidfVectorizer::from_artifact(a.clone()).unwrap();
        let d = v.transform_one("x1 x1 x1 y1").to_dense();
        let x = 1.0 + 3f64.ln();
        assert!((d[0] - x / (x + 1.0)).abs() < 1e-12);
        assert!((d[1] - 1.0 / (x + 1.0)).abs() < 1e-12);

        a.sublinear_tf = false;
        a.binary = true;
        a.norm = None;
        let v = TfidfVectorizer::from_artifact(a).unwrap();
        assert_eq!(v.transform_one("x1 x1 x1 y1").to_dense(), vec![1.0, 1.0]);
    }

    #[test]
    fn bigrams_after_stop_words() {
        let mut a = artifact(&["rate", "rate cut", "cut"]);
        a.ngram_range = (1, 2);
        a.stop_words = vec!["the".into()];
        let v = TfidfVectorizer::from_artifact(a).unwrap();
        // "the" is removed before n-grams, so "rate cut" is adjacent
        let row = v.transform_one("rate the cut");
        assert_eq!(row.to_dense(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn empty_document_gives_zero_row() {
        let v = TfidfVectorizer::from_artifact(artifact(&["fed"])).unwrap();
        let row = v.transform_one("");
        assert_eq!(row.width(), 1);
        assert_eq!(row.nnz(), 0);
    }

    #[test]
    fn batch_transform_keeps_order() {
        let v = TfidfVectorizer::from_artifact(artifact(&["fed", "cut"])).unwrap();
        let rows = v.transform(&["cut", "fed fed"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].to_dense(), vec![0.0, 1.0]);
        assert_eq!(rows[1].to_dense(), vec![2.0, 0.0]);
    }

    #[test]
    fn rejects_inconsistent_artifacts() {
        let mut a = artifact(&["a1", "b1"]);
        a.idf = Some(vec![1.0]);
        assert!(matches!(
            TfidfVectorizer::from_artifact(a),
            Err(ArtifactError::Invalid { .. })
        ));

        let mut a = artifact(&["a1", "b1"]);
        a.vocabulary.insert("b1".into(), 7);
        assert!(TfidfVectorizer::from_artifact(a).is_err());

        let mut a = artifact(&["a1"]);
        a.ngram_range = (2, 1);
        assert!(TfidfVectorizer::from_artifact(a).is_err());

        assert!(TfidfVectorizer::from_artifact(artifact(&[])).is_err());
    }

    #[test]
    fn parses_json_with_defaults() {
        let a: TfidfArtifact = serde_json::from_str(r#"{"vocabulary":{"fed":0}}"#).unwrap();
        assert_eq!(a.ngram_range, (1, 1));
        assert_eq!(a.norm, Some(Norm::L2));
        assert!(a.lowercase);
        let v = TfidfVectorizer::from_artifact(a).unwrap();
        assert_eq!(v.transform_one("fed fed").to_dense(), vec![1.0]);
    }

    #[test]
    fn lowercase_flag_is_read_from_json() {
        let json = r#"{"vocabulary":{"fed":0,"Fed":1},"norm":null,"lowercase":false}"#;
        let a: TfidfArtifact = serde_json::from_str(json).unwrap();
        assert!(!a.lowercase);
        let v = TfidfVectorizer::from_artifact(a).unwrap();
        assert_eq!(v.transform_one("Fed fed FED").to_dense(), vec![1.0, 1.0]);

        let mut a = artifact(&["fed"]);
        a.lowercase = true;
        let v = TfidfVectorizer::from_artifact(a).unwrap();
        assert_eq!(v.transform_one("Fed fed FED").to_dense(), vec![3.0]);
    }
}
