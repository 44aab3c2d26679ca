use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use marquee_api::api::{create_router, AppState};
use marquee_api::cache::{create_redis_client, Cache};
use marquee_api::config::Config;
use marquee_api::services::PopularityLedger;
use marquee_api::store::HttpDocumentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Trending reads survive without a cache; degrade with a warning.
    let cache = match create_redis_client(&config.redis_url) {
        Ok(client) => Some(Cache::new(client)),
        Err(e) => {
            tracing::warn!(error = %e, "Redis unavailable, running without trending cache");
            None
        }
    };

    let store = Arc::new(HttpDocumentStore::new(&config));
    let ledger = Arc::new(PopularityLedger::new(
        store,
        cache,
        config.poster_base_url.clone(),
    ));

    let state = AppState::new(ledger, config.trending_limit);
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
