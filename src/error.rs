//! Load-time error types.
//!
//! Everything that can go wrong happens while the model artifacts are read and
//! checked. Once a [`crate::pipeline::Pipeline`] exists, scoring has no error path.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or wiring the vectorizer/classifier artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Artifact file is missing or unreadable.
    #[error("failed to read artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact file is not valid JSON for the expected schema.
    #[error("failed to parse artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact parsed but its contents are inconsistent.
    #[error("invalid {artifact} artifact: {reason}")]
    Invalid {
        artifact: &'static str,
        reason: String,
    },

    /// Vectorizer width plus lexical columns does not match the classifier input.
    #[error(
        "incompatible artifacts: vocabulary width {vocabulary} + {lexical} lexical features \
         != classifier input width {expected}"
    )]
    DimensionMismatch {
        vocabulary: usize,
        lexical: usize,
        expected: usize,
    },
}

impl ArtifactError {
    pub(crate) fn invalid(artifact: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            artifact,
            reason: reason.into(),
        }
    }
}
