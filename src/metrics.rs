use axum::{routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::score::Assessment;

static RECORDER: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once per process) and publish the
    /// vocabulary width of the loaded vectorizer.
    pub fn init(vocabulary_width: usize) -> anyhow::Result<Self> {
        // Use default buckets to avoid API differences across crate versions.
        let handle = RECORDER
            .get_or_try_init(|| PrometheusBuilder::new().install_recorder())?
            .clone();

        gauge!("factlyzer_vocabulary_width").set(vocabulary_width as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Record one completed analysis. No-op when no recorder is installed.
pub fn record_analysis(assessment: &Assessment, elapsed_ms: f64) {
    counter!("factlyzer_analyses_total", "level" => assessment.level.label()).increment(1);
    histogram!("factlyzer_score").record(assessment.score.value() as f64);
    histogram!("factlyzer_analyze_duration_ms").record(elapsed_ms);
}

/// Record a rejected request (`empty`, `too_large`).
pub fn record_rejected(reason: &'static str) {
    counter!("factlyzer_rejected_total", "reason" => reason).increment(1);
}
