//! CourseScout Query API — class search REST server.
//!
//! Fronts the external search index with the nine section search tools:
//! filter normalization, schedule-aware search, comparison, availability,
//! and filter discovery.

use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use cs_query_api::config::ApiConfig;
use cs_query_api::routes::build_router;
use cs_query_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cs-query-api starting");

    let config = ApiConfig::from_env();

    // Talk to the external index if CS_INDEX_URL is set, otherwise serve
    // the in-memory sample catalog.
    let state = match config.index_url.as_deref() {
        Some(url) => {
            tracing::info!(index = %url, "connecting to search index");
            AppState::with_http_index(&config, url)?
        }
        None => {
            tracing::warn!("CS_INDEX_URL not set — serving the in-memory sample catalog");
            AppState::with_mock_catalog()
        }
    };

    spawn_vocab_refresh(&state, Duration::from_secs(config.vocab_refresh_secs));

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically rebuild the vocabulary from the index's distinct values.
/// Failures are logged and retried on the next tick; readers keep the
/// previous snapshot in the meantime.
fn spawn_vocab_refresh(state: &AppState, interval: Duration) {
    let index = state.index.clone();
    let vocab = state.vocab.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(e) = vocab.refresh(index.as_ref()).await {
                tracing::warn!(error = %e, "vocabulary refresh failed");
            }
        }
    });
}
