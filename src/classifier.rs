//! Probabilistic classifier collaborator.
//!
//! The pipeline only consumes `P(trustworthy | row)` through [`Classifier`].
//! Two linear model exports are supported, tagged by `"kind"`:
//!
//! ```json
//! { "kind": "logistic_regression", "coef": [0.4, -1.2], "intercept": 0.1 }
//! { "kind": "multinomial_nb", "class_log_prior": [-0.7, -0.7],
//!   "feature_log_prob": [[-1.1, -0.4], [-0.3, -1.4]] }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::artifacts::read_json;
use crate::error::ArtifactError;
use crate::sparse::SparseVector;

/// Opaque binary classifier returning the positive-class probability.
pub trait Classifier: Send + Sync {
    /// Input width the model was trained with.
    fn n_features(&self) -> usize;

    /// Probability of the positive ("trustworthy") class for one row.
    fn predict_probability(&self, row: &SparseVector) -> f64;

    /// Per-row positive-class probabilities.
    fn predict_proba(&self, rows: &[SparseVector]) -> Vec<f64> {
        rows.iter().map(|r| self.predict_probability(r)).collect()
    }

    /// Model family name for diagnostics.
    fn name(&self) -> &'static str;
}

/// On-disk form of a classifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression {
        coef: Vec<f64>,
        intercept: f64,
    },
    MultinomialNb {
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    },
}

impl ClassifierArtifact {
    /// Validate and build the matching model.
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>, ArtifactError> {
        match self {
            Self::LogisticRegression { coef, intercept } => {
                Ok(Arc::new(LogisticRegression::new(coef, intercept)?))
            }
            Self::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => Ok(Arc::new(MultinomialNb::new(
                class_log_prior,
                feature_log_prob,
            )?)),
        }
    }
}

/// Read a classifier artifact from disk.
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, ArtifactError> {
    let artifact: ClassifierArtifact = read_json(path)?;
    artifact.into_classifier()
}

const KIND: &str = "classifier";

fn check_weights(label: &str, w: &[f64]) -> Result<(), ArtifactError> {
    if w.is_empty() {
        return Err(ArtifactError::invalid(KIND, format!("{label} is empty")));
    }
    if w.iter().any(|x| !x.is_finite()) {
        return Err(ArtifactError::invalid(
            KIND,
            format!("{label} contains non-finite values"),
        ));
    }
    Ok(())
}

/// Numerically stable logistic function.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Binary logistic regression: `sigmoid(coef · x + intercept)`.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Result<Self, ArtifactError> {
        check_weights("coef", &coef)?;
        if !intercept.is_finite() {
            return Err(ArtifactError::invalid(KIND, "intercept is not finite"));
        }
        Ok(Self { coef, intercept })
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict_probability(&self, row: &SparseVector) -> f64 {
        sigmoid(row.dot(&self.coef) + self.intercept)
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}

/// Two-class multinomial naive Bayes.
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    class_log_prior: [f64; 2],
    feature_log_prob: [Vec<f64>; 2],
}

impl MultinomialNb {
    pub fn new(
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> Result<Self, ArtifactError> {
        let prior: [f64; 2] = class_log_prior.try_into().map_err(|v: Vec<f64>| {
            ArtifactError::invalid(KIND, format!("expected 2 class priors, got {}", v.len()))
        })?;
        check_weights("class_log_prior", &prior)?;

        let [neg, pos]: [Vec<f64>; 2] = feature_log_prob.try_into().map_err(|v: Vec<Vec<f64>>| {
            ArtifactError::invalid(
                KIND,
                format!("expected 2 feature_log_prob rows, got {}", v.len()),
            )
        })?;
        check_weights("feature_log_prob[0]", &neg)?;
        check_weights("feature_log_prob[1]", &pos)?;
        if neg.len() != pos.len() {
            return Err(ArtifactError::invalid(
                KIND,
                format!(
                    "feature_log_prob rows differ in width ({} vs {})",
                    neg.len(),
                    pos.len()
                ),
            ));
        }

        Ok(Self {
            class_log_prior: prior,
            feature_log_prob: [neg, pos],
        })
    }
}

impl Classifier for MultinomialNb {
    fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    fn predict_probability(&self, row: &SparseVector) -> f64 {
        let neg = self.class_log_prior[0] + row.dot(&self.feature_log_prob[0]);
        let pos = self.class_log_prior[1] + row.dot(&self.feature_log_prob[1]);
        // softmax over two classes == sigmoid of the log-odds
        sigmoid(pos - neg)
    }

    fn name(&self) -> &'static str {
        "multinomial_nb"
    }
}
