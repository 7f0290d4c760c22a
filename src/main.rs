//! Factlyzer: binary entrypoint
//! Loads config + model artifacts once, then boots the Axum HTTP server.

use factlyzer::{api, logging, metrics::Metrics};
use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    logging::init_tracing(logging::DEFAULT_FILTER);

    // Missing/incompatible artifacts abort startup here.
    let (cfg, pipeline) = factlyzer::bootstrap()?;
    let metrics = Metrics::init(pipeline.vocabulary_width())?;

    let state = api::AppState::new(pipeline)
        .with_server(cfg.server)
        .with_metrics(metrics);
    let router = api::create_router(state);

    Ok(router.into())
}
