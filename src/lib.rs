// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

// Scoring pipeline (normalize, features, vectorize, assemble, classify, score)
pub mod artifacts;
pub mod assemble;
pub mod classifier;
pub mod features;
pub mod normalize;
pub mod pipeline;
pub mod score;
pub mod sparse;
pub mod vectorizer;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::artifacts::{ArtifactPaths, ModelArtifacts};
pub use crate::error::ArtifactError;
pub use crate::pipeline::Pipeline;
pub use crate::score::{map_score, Assessment, ScoreTicker, TrustLevel, TrustScore};

use crate::config::AppConfig;
use tracing::info;

/// Load config and artifacts, then build the pipeline.
/// Fails fast: nothing should serve requests if this returns an error.
pub fn bootstrap() -> anyhow::Result<(AppConfig, Pipeline)> {
    let cfg = AppConfig::load_default()?;
    let artifacts = ModelArtifacts::load(&cfg.artifacts)?;
    let pipeline = Pipeline::from_artifacts(artifacts)?;
    info!(
        vocabulary_width = pipeline.vocabulary_width(),
        classifier = pipeline.classifier_name(),
        "pipeline ready"
    );
    Ok((cfg, pipeline))
}
