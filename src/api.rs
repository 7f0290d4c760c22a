use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::config::ServerConfig;
use crate::metrics::{self, Metrics};
use crate::pipeline::Pipeline;
use crate::score::{TrustLevel, TrustScore};

/// Shown when the submitted article is blank.
pub const EMPTY_TEXT_WARNING: &str = "Please enter some text to analyze.";

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub server: ServerConfig,
    pub metrics: Option<Metrics>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            server: ServerConfig::default(),
            metrics: None,
        }
    }

    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.server = server;
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }
}

/// Request body ceiling for a given text limit. JSON escaping can grow a
/// byte of text up to six (`\u0001`), so over-long text still reaches the
/// handler and gets the JSON 413 instead of the extractor's plain-text one.
fn body_limit(max_text_bytes: usize) -> usize {
    max_text_bytes.saturating_mul(6).saturating_add(1024)
}

pub fn create_router(state: AppState) -> Router {
    let limit = body_limit(state.server.max_text_bytes);
    let mut router = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .route("/analyze/ticker", get(ticker));

    if let Some(m) = &state.metrics {
        router = router.merge(m.router());
    }

    router
        .layer(DefaultBodyLimit::max(limit))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct AnalyzeReq {
    text: String,
}

#[derive(Serialize)]
struct AnalyzeResp {
    score: TrustScore,
    level: TrustLevel,
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorResp {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResp>);

fn reject(status: StatusCode, reason: &'static str, error: String) -> ApiError {
    metrics::record_rejected(reason);
    (status, Json(ErrorResp { error }))
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<AnalyzeResp>, ApiError> {
    if body.text.trim().is_empty() {
        return Err(reject(
            StatusCode::UNPROCESSABLE_ENTITY,
            "empty",
            EMPTY_TEXT_WARNING.to_string(),
        ));
    }
    let limit = state.server.max_text_bytes;
    if body.text.len() > limit {
        warn!(len = body.text.len(), limit, "article text too large");
        return Err(reject(
            StatusCode::PAYLOAD_TOO_LARGE,
            "too_large",
            format!("Article text exceeds {limit} bytes."),
        ));
    }

    let started = Instant::now();
    let a = state.pipeline.analyze(&body.text);
    metrics::record_analysis(&a, started.elapsed().as_secs_f64() * 1000.0);

    Ok(Json(AnalyzeResp {
        score: a.score,
        level: a.level,
        message: a.message,
    }))
}

#[derive(Deserialize)]
struct TickerQuery {
    score: u32,
}

/// Count-up frames `0..=score` for clients that animate the result.
async fn ticker(Query(q): Query<TickerQuery>) -> Json<Vec<u8>> {
    Json(TrustScore::new(q.score).ticker().collect())
}
