use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{SearchRecord, TopResult};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecordSearchRequest {
    pub search_term: String,
    pub top_result: TopResult,
}

#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TrendingEntry {
    pub search_term: String,
    pub count: u64,
    pub movie_id: u64,
    pub poster_url: String,
}

impl From<SearchRecord> for TrendingEntry {
    fn from(record: SearchRecord) -> Self {
        Self {
            search_term: record.search_term,
            count: record.count,
            movie_id: record.movie_id,
            poster_url: record.poster_url,
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Record one occurrence of a completed search
///
/// Validates the payload at the boundary, then hands it to the ledger,
/// which absorbs store failures. 202 means "accepted", not "persisted":
/// a store outage is never a caller-visible error here.
pub async fn record_search(
    State(state): State<AppState>,
    Json(request): Json<RecordSearchRequest>,
) -> Result<StatusCode, AppError> {
    if request.search_term.is_empty() {
        return Err(AppError::InvalidInput(
            "search_term must not be empty".to_string(),
        ));
    }
    request.top_result.validate()?;

    state
        .ledger
        .record_occurrence(&request.search_term, &request.top_result)
        .await;

    Ok(StatusCode::ACCEPTED)
}

/// Get the most-searched terms, highest count first
pub async fn get_trending(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> Json<Vec<TrendingEntry>> {
    let limit = params.limit.unwrap_or(state.default_trending_limit);
    let records = state.ledger.get_trending(limit).await;
    Json(records.into_iter().map(TrendingEntry::from).collect())
}
