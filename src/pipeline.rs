//! # Scoring pipeline
//! `analyze(text)` = normalize → vectorize, extract lexical signals from the raw
//! text, assemble one row, classify, map the probability to a trust score.
//!
//! Pure given its two immutable handles; safe to share across threads.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::artifacts::ModelArtifacts;
use crate::assemble::assemble;
use crate::classifier::Classifier;
use crate::error::ArtifactError;
use crate::features::{extract, LEXICAL_WIDTH};
use crate::normalize::normalize;
use crate::score::{map_score, Assessment};
use crate::vectorizer::Vectorizer;

#[derive(Clone)]
pub struct Pipeline {
    vectorizer: Arc<dyn Vectorizer>,
    classifier: Arc<dyn Classifier>,
}

impl Pipeline {
    /// Wire the handles, checking `V + 4 == classifier input width` once.
    pub fn new(
        vectorizer: Arc<dyn Vectorizer>,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        let vocabulary = vectorizer.vocabulary_width();
        let expected = classifier.n_features();
        if vocabulary + LEXICAL_WIDTH != expected {
            return Err(ArtifactError::DimensionMismatch {
                vocabulary,
                lexical: LEXICAL_WIDTH,
                expected,
            });
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn from_artifacts(artifacts: ModelArtifacts) -> Result<Self, ArtifactError> {
        Self::new(artifacts.vectorizer, artifacts.classifier)
    }

    pub fn vocabulary_width(&self) -> usize {
        self.vectorizer.vocabulary_width()
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    /// Score one article. Empty or whitespace-only text still yields a score.
    pub fn analyze(&self, text: &str) -> Assessment {
        let cleaned = normalize(text);
        let tf = self.vectorizer.transform_one(&cleaned);
        let lexical = extract(text);
        let row = assemble(&tf, &lexical);
        let probability = self.classifier.predict_probability(&row);
        let assessment = map_score(probability);

        // Never log raw text. Only hashed id + numbers.
        debug!(
            target: "factlyzer::pipeline",
            id = %anon_hash(text),
            terms = tf.nnz(),
            words = lexical.word_count,
            clickbait = lexical.clickbait_hits,
            probability,
            score = assessment.score.value(),
            level = %assessment.level,
            "article analyzed"
        );
        assessment
    }
}

/// Short SHA-256 prefix used to correlate log lines without storing text.
pub(crate) fn anon_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LogisticRegression;
    use crate::sparse::SparseVector;
    use crate::score::TrustLevel;
    use crate::vectorizer::{TfidfArtifact, TfidfVectorizer};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Returns a fixed probability and remembers the last row it saw.
    struct RecordingClassifier {
        width: usize,
        p: f64,
        last: Mutex<Option<SparseVector>>,
    }

    impl Classifier for RecordingClassifier {
        fn n_features(&self) -> usize {
            self.width
        }
        fn predict_probability(&self, row: &SparseVector) -> f64 {
            *self.last.lock().unwrap() = Some(row.clone());
            self.p
        }
        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn vectorizer(terms: &[&str]) -> Arc<dyn Vectorizer> {
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();
        let a = TfidfArtifact {
            vocabulary,
            idf: None,
            ngram_range: (1, 1),
            norm: None,
            sublinear_tf: false,
            binary: false,
            lowercase: true,
            stop_words: Vec::new(),
        };
        Arc::new(TfidfVectorizer::from_artifact(a).unwrap())
    }

    #[test]
    fn end_to_end_with_fixed_probability() {
        let recorder = Arc::new(RecordingClassifier {
            width: 7,
            p: 0.92,
            last: Mutex::new(None),
        });
        let pipeline = Pipeline::new(vectorizer(&["secret", "exclusive", "revealed"]), recorder.clone())
            .unwrap();

        let out = pipeline.analyze("Exclusive secret revealed!!").into_tuple();
        assert_eq!(out, (92, TrustLevel::High, "The article is Highly Trustworthy"));

        let row = recorder.last.lock().unwrap().clone().unwrap();
        // tf columns, then [words, '!', '?', clickbait]
        assert_eq!(row.to_dense(), vec![1.0, 1.0, 1.0, 3.0, 2.0, 0.0, 2.0]);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let lr = Arc::new(LogisticRegression::new(vec![0.0; 5], 0.0).unwrap());
        let err = Pipeline::new(vectorizer(&["a1", "b1"]), lr).err().unwrap();
        assert!(matches!(
            err,
            ArtifactError::DimensionMismatch {
                vocabulary: 2,
                lexical: 4,
                expected: 5
            }
        ));
    }

    #[test]
    fn empty_text_scores_from_intercept() {
        // all-zero row -> sigmoid(intercept)
        let lr = Arc::new(LogisticRegression::new(vec![1.0; 6], -3.0).unwrap());
        let pipeline = Pipeline::new(vectorizer(&["fed", "cut"]), lr).unwrap();
        let a = pipeline.analyze("   ");
        assert_eq!(a.score.value(), 4); // sigmoid(-3) = 0.0474
        assert_eq!(a.level, TrustLevel::Low);
    }

    #[test]
    fn deterministic_across_calls_and_clones() {
        let lr = Arc::new(LogisticRegression::new(vec![0.3, -0.2, 0.01, -0.5, 0.0, -0.7], 0.4).unwrap());
        let pipeline = Pipeline::new(vectorizer(&["fed", "cut"]), lr).unwrap();
        let text = "Fed cut? OMG, shocking!";
        let a = pipeline.analyze(text);
        let b = pipeline.clone().analyze(text);
        assert_eq!(a, b);
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        let h = anon_hash("hello");
        assert_eq!(h.len(), 12);
        assert_eq!(h, anon_hash("hello"));
        assert_ne!(h, anon_hash("hello!"));
    }
}
