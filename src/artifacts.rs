//! One-time loading of the pretrained vectorizer and classifier.
//!
//! Returns explicit `Arc` handles; callers pass them into
//! [`crate::pipeline::Pipeline::new`]. Nothing is cached globally.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;

use crate::classifier::{load_classifier, Classifier};
use crate::error::ArtifactError;
use crate::vectorizer::{TfidfVectorizer, Vectorizer};

pub const DEFAULT_VECTORIZER_PATH: &str = "artifacts/vectorizer.json";
pub const DEFAULT_MODEL_PATH: &str = "artifacts/model.json";

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from(DEFAULT_VECTORIZER_PATH)
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

/// Where the two artifacts live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtifactPaths {
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer: PathBuf,
    #[serde(default = "default_model_path")]
    pub model: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            vectorizer: default_vectorizer_path(),
            model: default_model_path(),
        }
    }
}

/// Loaded, immutable handles.
#[derive(Clone)]
pub struct ModelArtifacts {
    pub vectorizer: Arc<dyn Vectorizer>,
    pub classifier: Arc<dyn Classifier>,
}

impl ModelArtifacts {
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let vectorizer = TfidfVectorizer::load(&paths.vectorizer)?;
        let classifier = load_classifier(&paths.model)?;
        info!(
            vectorizer = %paths.vectorizer.display(),
            model = %paths.model.display(),
            vocabulary_width = vectorizer.vocabulary_width(),
            classifier = classifier.name(),
            n_features = classifier.n_features(),
            "model artifacts loaded"
        );
        Ok(Self {
            vectorizer: Arc::new(vectorizer),
            classifier,
        })
    }
}

/// Read and deserialize a JSON artifact, tagging errors with the path.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
