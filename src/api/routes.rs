use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Search occurrences
        .route("/searches", post(handlers::record_search))
        // Trending terms
        .route("/trending", get(handlers::get_trending))
        .with_state(state)
}
