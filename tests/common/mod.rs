// tests/common/mod.rs
#![allow(dead_code)]

use factlyzer::{ArtifactPaths, ModelArtifacts, Pipeline};

/// Pipeline over the demo artifacts checked into `artifacts/`.
pub fn demo_pipeline() -> Pipeline {
    let artifacts =
        ModelArtifacts::load(&ArtifactPaths::default()).expect("load demo artifacts for tests");
    Pipeline::from_artifacts(artifacts).expect("demo artifacts are compatible")
}

pub const SOBER: &str = "According to government data, the economy grew 2.1 percent, \
                         officials announced in a study report.";
pub const CLICKBAIT: &str = "SHOCKING!!! You wont believe this secret they hide!!!";
pub const QUESTIONING: &str = "Officials announced the report on Tuesday. Is the data complete?";
pub const WITH_URL: &str = "The report is out. Read it at https://example.com/report now";
